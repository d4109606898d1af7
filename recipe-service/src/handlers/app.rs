use axum::Json;
use serde_json::{json, Value};

/// Liveness probe. The service has no dependencies worth probing.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "recipe-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
