//! Inbound body of `POST /api/generateRecipe`.

use super::Part;
use serde_json::Value;
use service_core::error::AppError;

pub const NO_CONTENT_MESSAGE: &str = "No prompt or image data provided.";

#[derive(Debug, Clone, Default)]
pub struct GenerateRecipeRequest {
    pub prompt: Option<String>,
    pub image: Option<ImagePayload>,
}

#[derive(Debug, Clone, Default)]
pub struct ImagePayload {
    pub mime_type: Option<String>,
    pub data: Option<String>,
}

impl GenerateRecipeRequest {
    /// Read `prompt`, `image.mimeType` and `image.data` from a decoded body.
    ///
    /// Only string fields of an object are taken. A body that is not an
    /// object, or a field of any other type, reads as absent.
    pub fn from_value(value: &Value) -> Self {
        let image = value
            .get("image")
            .filter(|v| v.is_object())
            .map(|image| ImagePayload {
                mime_type: string_field(image, "mimeType"),
                data: string_field(image, "data"),
            });

        Self {
            prompt: string_field(value, "prompt"),
            image,
        }
    }

    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            image: None,
        }
    }

    /// Ordered parts: text first, then the image. Empty strings count as absent.
    pub fn parts(&self) -> Vec<Part> {
        let mut parts = Vec::with_capacity(2);

        if let Some(prompt) = self.prompt.as_deref().filter(|p| !p.is_empty()) {
            parts.push(Part::text(prompt));
        }

        if let Some(image) = &self.image {
            if let Some(data) = image.data.as_deref().filter(|d| !d.is_empty()) {
                parts.push(Part::inline_data(image.mime_type.clone(), data));
            }
        }

        parts
    }

    /// Like [`parts`](Self::parts), but rejects a request with nothing to send.
    pub fn into_parts(self) -> Result<Vec<Part>, AppError> {
        let parts = self.parts();
        if parts.is_empty() {
            return Err(AppError::BadRequest(NO_CONTENT_MESSAGE.to_string()));
        }
        Ok(parts)
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.as_object()?.get(key)?.as_str().map(str::to_string)
}
