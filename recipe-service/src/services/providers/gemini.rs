//! Gemini provider.
//!
//! Calls `models/{model}:generateContent` once per request and hands back the
//! raw response document. No retries, no streaming, no client-side timeout.

use super::{ContentGenerator, ProviderError};
use crate::models::Part;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }
}

pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: GeminiConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            method
        )
    }
}

#[async_trait]
impl ContentGenerator for GeminiProvider {
    async fn generate(&self, parts: &[Part]) -> Result<serde_json::Value, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ProviderError::NotConfigured("GEMINI_API_KEY is not set".to_string())
            })?;

        let request = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts,
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            part_count = parts.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: &'a [Part],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer, key: Option<&str>) -> GeminiProvider {
        GeminiProvider::new(GeminiConfig {
            api_key: key.map(|k| Secret::new(k.to_string())),
            model: DEFAULT_MODEL.to_string(),
            base_url: server.uri(),
        })
        .unwrap()
    }

    const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

    #[tokio::test]
    async fn sends_parts_as_single_user_content() {
        let server = MockServer::start().await;
        let upstream = json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "Tomato soup" }] } }],
            "usageMetadata": { "promptTokenCount": 4 }
        });

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "what is this?" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&upstream))
            .expect(1)
            .mount(&server)
            .await;

        let parts = vec![
            Part::text("what is this?"),
            Part::inline_data(Some("image/png".into()), "AAAA"),
        ];
        let result = provider(&server, Some("test-key"))
            .generate(&parts)
            .await
            .unwrap();

        assert_eq!(result, upstream);
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider(&server, None)
            .generate(&[Part::text("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));

        let err = provider(&server, Some(""))
            .generate(&[Part::text("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn upstream_rejection_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": { "message": "API key not valid" } })),
            )
            .mount(&server)
            .await;

        let err = provider(&server, Some("bad"))
            .generate(&[Part::text("hi")])
            .await
            .unwrap_err();

        match err {
            ProviderError::ApiError { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn quota_exhaustion_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = provider(&server, Some("k"))
            .generate(&[Part::text("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited));
    }

    #[tokio::test]
    async fn non_json_success_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider(&server, Some("k"))
            .generate(&[Part::text("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_network_error() {
        let config = GeminiConfig {
            api_key: Some(Secret::new("k".to_string())),
            model: DEFAULT_MODEL.to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        };
        let err = GeminiProvider::new(config)
            .unwrap()
            .generate(&[Part::text("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NetworkError(_)));
    }
}
