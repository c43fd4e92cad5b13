//! Gemini response body and its conversion to [`pcore::Response`].

use anyhow::{Result, bail};
use base64::{Engine, engine::general_purpose::STANDARD};
use compact_str::CompactString;
use pcore::{Content, FinishReason, Image, Part, Response, Role, Usage};
use serde::Deserialize;

/// Raw `generateContent` response (also one SSE chunk).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireResponse {
    /// Generated candidates; only the first is used.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback on the prompt, set when it was blocked.
    pub prompt_feedback: Option<PromptFeedback>,
    /// Token accounting.
    pub usage_metadata: Option<UsageMetadata>,
    /// Error object, present on failures reported in-band.
    pub error: Option<ErrorDetail>,
}

/// A generated candidate.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The candidate content, absent when blocked.
    pub content: Option<CandidateContent>,
    /// Why generation stopped.
    pub finish_reason: Option<FinishReason>,
}

/// Candidate content.
#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    /// Author role.
    #[serde(default = "model_role")]
    pub role: Role,
    /// The parts.
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

/// A candidate part. Only text and inline data are understood.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePart {
    /// Text content.
    pub text: Option<String>,
    /// Inline media.
    pub inline_data: Option<CandidateInline>,
}

/// Inline media in a candidate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateInline {
    /// MIME type.
    pub mime_type: CompactString,
    /// Base64 bytes.
    pub data: String,
}

/// Prompt feedback.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Why the prompt was blocked.
    pub block_reason: Option<CompactString>,
}

/// Usage metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// The error.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    /// HTTP-like status code.
    #[serde(default)]
    pub code: u16,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
    /// Canonical status name.
    #[serde(default)]
    pub status: CompactString,
}

fn model_role() -> Role {
    Role::Model
}

impl WireResponse {
    /// Convert into the unified response.
    ///
    /// Fails on in-band errors and on blocked prompts that produced no
    /// candidate.
    pub fn into_response(self) -> Result<Response> {
        if let Some(error) = self.error {
            bail!("{}", error.message);
        }

        let usage = self.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        let Some(candidate) = self.candidates.into_iter().next() else {
            if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
                bail!("prompt blocked: {reason}");
            }
            return Ok(Response {
                content: Content {
                    role: Role::Model,
                    parts: Vec::new(),
                },
                finish_reason: None,
                usage,
            });
        };

        let content = candidate
            .content
            .map(|content| Content {
                role: content.role,
                parts: content.parts.into_iter().filter_map(to_part).collect(),
            })
            .unwrap_or(Content {
                role: Role::Model,
                parts: Vec::new(),
            });

        Ok(Response {
            content,
            finish_reason: candidate.finish_reason,
            usage,
        })
    }
}

fn to_part(part: CandidatePart) -> Option<Part> {
    if let Some(text) = part.text {
        return Some(Part::Text(text));
    }
    let inline = part.inline_data?;
    match STANDARD.decode(inline.data.as_bytes()) {
        Ok(data) => Some(Part::Image(Image {
            mime: inline.mime_type,
            data,
            width: 0,
            height: 0,
        })),
        Err(e) => {
            tracing::warn!("dropping undecodable inline data: {e}");
            None
        }
    }
}

/// Extract a readable message from an error response body.
pub(crate) fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => format!("request failed with status {status}: {body}"),
    }
}
