//! Content parts in Gemini wire format.

use serde::{Deserialize, Serialize};

/// One segment of a multimodal prompt.
///
/// Serialises untagged, so a text part is `{"text": "..."}` and an image is
/// `{"inlineData": {"mimeType": "...", "data": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 payload with its declared media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn inline_data(mime_type: Option<String>, data: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type,
                data: data.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_part_wire_format() {
        let value = serde_json::to_value(Part::text("hello")).unwrap();
        assert_eq!(value, json!({ "text": "hello" }));
    }

    #[test]
    fn inline_data_wire_format() {
        let part = Part::inline_data(Some("image/png".into()), "iVBORw0KGgo=");
        let value = serde_json::to_value(part).unwrap();
        assert_eq!(
            value,
            json!({ "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } })
        );
    }

    #[test]
    fn missing_mime_type_is_omitted() {
        let value = serde_json::to_value(Part::inline_data(None, "abc")).unwrap();
        assert_eq!(value, json!({ "inlineData": { "data": "abc" } }));
    }
}
