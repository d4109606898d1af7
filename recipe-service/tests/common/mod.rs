#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use recipe_service::config::ServerSettings;
use recipe_service::services::providers::mock::MockContentGenerator;
use recipe_service::startup::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const GENERATE_URI: &str = "/api/generateRecipe";

pub fn static_dir() -> String {
    format!("{}/static", env!("CARGO_MANIFEST_DIR"))
}

pub fn settings() -> ServerSettings {
    ServerSettings {
        static_dir: static_dir(),
        ..ServerSettings::default()
    }
}

pub fn router_with(generator: &MockContentGenerator, settings: &ServerSettings) -> Router {
    build_router(AppState::new(Arc::new(generator.clone())), settings)
}

pub fn router(generator: &MockContentGenerator) -> Router {
    router_with(generator, &settings())
}

pub fn json_request(body: impl Into<Body>) -> Request<Body> {
    Request::post(GENERATE_URI)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
