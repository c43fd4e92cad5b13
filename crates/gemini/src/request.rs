//! Gemini request body.

use base64::{Engine, engine::general_purpose::STANDARD};
use pcore::{Content, Part, Role};
use serde::Serialize;

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The conversation contents.
    pub contents: Vec<WireContent>,
    /// Sampling configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<WireGenerationConfig>,
}

/// A content entry in wire format.
#[derive(Debug, Clone, Serialize)]
pub struct WireContent {
    /// `user` or `model`.
    pub role: Role,
    /// The ordered parts.
    pub parts: Vec<WirePart>,
}

/// A part in wire format.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WirePart {
    /// Plain text.
    Text { text: String },
    /// Base64 inline data.
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Inline media payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the payload.
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// Sampling configuration in wire format.
#[derive(Debug, Clone, Serialize)]
pub struct WireGenerationConfig {
    /// Sampling temperature.
    pub temperature: f32,
}

impl From<&Content> for WireContent {
    fn from(content: &Content) -> Self {
        let parts = content
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => WirePart::Text { text: text.clone() },
                Part::Image(image) => WirePart::Inline {
                    inline_data: InlineData {
                        mime_type: image.mime.to_string(),
                        data: STANDARD.encode(&image.data),
                    },
                },
            })
            .collect();
        Self {
            role: content.role,
            parts,
        }
    }
}

impl From<&pcore::Request> for Request {
    fn from(req: &pcore::Request) -> Self {
        Self {
            contents: req.contents.iter().map(WireContent::from).collect(),
            generation_config: req
                .temperature
                .map(|temperature| WireGenerationConfig { temperature }),
        }
    }
}
