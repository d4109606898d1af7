//! `POST /api/generateRecipe`: the proxy endpoint.

use crate::models::GenerateRecipeRequest;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use service_core::error::AppError;

const MALFORMED_JSON_MESSAGE: &str = "Malformed JSON request body.";
const MALFORMED_FORM_MESSAGE: &str = "Malformed form request body.";
const TOO_LARGE_MESSAGE: &str = "Request body too large.";

/// Forward the prompt and optional photo upstream and relay the answer as-is.
pub async fn generate_recipe(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, AppError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(TOO_LARGE_MESSAGE.to_string())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })?;

    let parts = decode_body(&headers, &body)?.into_parts().inspect_err(|_| {
        tracing::debug!("Rejected request without prompt or image");
    })?;

    match state.generator.generate(&parts).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!(error = %e, "Gemini API error");
            Err(AppError::UpstreamError(e.into()))
        }
    }
}

#[derive(Debug, Deserialize)]
struct PromptForm {
    prompt: Option<String>,
}

/// Decode by content type. Bodies that are empty or of an unknown type carry
/// nothing usable and decode to an empty request.
fn decode_body(headers: &HeaderMap, body: &[u8]) -> Result<GenerateRecipeRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateRecipeRequest::default());
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if content_type == "application/json" || content_type.ends_with("+json") {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Malformed JSON body");
            AppError::BadRequest(MALFORMED_JSON_MESSAGE.to_string())
        })?;
        Ok(GenerateRecipeRequest::from_value(&value))
    } else if content_type == "application/x-www-form-urlencoded" {
        let form: PromptForm = serde_urlencoded::from_bytes(body)
            .map_err(|_| AppError::BadRequest(MALFORMED_FORM_MESSAGE.to_string()))?;
        Ok(GenerateRecipeRequest {
            prompt: form.prompt,
            image: None,
        })
    } else {
        Ok(GenerateRecipeRequest::default())
    }
}
