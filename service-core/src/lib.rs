//! service-core: shared infrastructure for the recipe proxy services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
pub use serde;
pub use tower_http;
pub use tracing;
