//! Mock provider for tests.

use super::{ContentGenerator, ProviderError};
use crate::models::Part;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

enum Outcome {
    Respond(serde_json::Value),
    Fail(fn() -> ProviderError),
}

/// Records every call and answers with a canned response or error.
///
/// Clones share the same call log, so a test can keep one handle and give the
/// other to the application.
#[derive(Clone)]
pub struct MockContentGenerator {
    outcome: Arc<Outcome>,
    calls: Arc<Mutex<Vec<Vec<Part>>>>,
}

impl MockContentGenerator {
    pub fn responding(response: serde_json::Value) -> Self {
        Self::with_outcome(Outcome::Respond(response))
    }

    pub fn failing(error: fn() -> ProviderError) -> Self {
        Self::with_outcome(Outcome::Fail(error))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome: Arc::new(outcome),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<Vec<Part>>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Parts received by each call, in order.
    pub fn calls(&self) -> Vec<Vec<Part>> {
        self.lock_calls().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate(&self, parts: &[Part]) -> Result<serde_json::Value, ProviderError> {
        self.lock_calls().push(parts.to_vec());

        match self.outcome.as_ref() {
            Outcome::Respond(value) => Ok(value.clone()),
            Outcome::Fail(make_error) => Err(make_error()),
        }
    }
}
