//! Upstream generation providers.
//!
//! Handlers talk to a [`ContentGenerator`] rather than to Gemini directly, so
//! the backend can be swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use crate::models::Part;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Sends assembled parts to a generative model.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate content and return the provider's response document untouched.
    async fn generate(&self, parts: &[Part]) -> Result<serde_json::Value, ProviderError>;
}
