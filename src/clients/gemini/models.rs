//! Wire types for the generateContent endpoint.

use crate::clients::gemini::config::GeminiConfig;
use crate::core::VisionRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known Gemini model ids.
pub struct GeminiModels;

impl GeminiModels {
    pub const FLASH_PREVIEW: &'static str = "gemini-3-flash-preview";

    pub const FLASH_2_5: &'static str = "gemini-2.5-flash";
    pub const FLASH_LITE_2_5: &'static str = "gemini-2.5-flash-lite";
    pub const PRO_2_5: &'static str = "gemini-2.5-pro";
}

/// Content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Base64 inline payload for image parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Map a [`VisionRequest`] into the wire format: one text part followed by
    /// one inline-data part per image. When a response schema is declared the
    /// request also asks for a JSON response body.
    pub fn new(request: &VisionRequest, config: &GeminiConfig) -> Self {
        let mut parts = vec![Part::Text {
            text: request.prompt.clone(),
        }];
        parts.extend(request.images.iter().map(|image| Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            },
        }));

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: request
                    .response_schema
                    .as_ref()
                    .map(|_| "application/json".to_string()),
                response_schema: request.response_schema.clone(),
                max_output_tokens: Some(config.max_output_tokens),
                temperature: Some(config.temperature),
            }),
        }
    }
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl GenerateContentResponse {
    /// The first text part of the first candidate, if any.
    pub fn first_text(&self) -> Option<String> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|part| match part {
                Part::Text { text } => Some(text.clone()),
                Part::InlineData { .. } => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InlineImage;

    fn request_with_images(count: usize) -> VisionRequest {
        VisionRequest {
            prompt: "describe".to_string(),
            images: (0..count)
                .map(|i| InlineImage {
                    data: format!("payload{i}"),
                    mime_type: "image/png".to_string(),
                })
                .collect(),
            response_schema: Some(serde_json::json!({"type": "object"})),
        }
    }

    #[test]
    fn request_serializes_text_then_inline_parts() {
        let wire = GenerateContentRequest::new(&request_with_images(2), &GeminiConfig::default());
        let value = serde_json::to_value(&wire).unwrap();

        let parts = value["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], "describe");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[2]["inlineData"]["data"], "payload1");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "object");
    }

    #[test]
    fn response_text_extraction() {
        let raw = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "hello"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text().as_deref(), Some("hello"));

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.first_text().is_none());
    }
}
