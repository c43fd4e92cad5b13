//! Generation response types.
//!
//! A streamed chunk and a complete reply share the same shape.

use crate::model::{Content, Role};
use serde::{Deserialize, Serialize};

/// A generation response or a streamed chunk of one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    /// The candidate content.
    pub content: Content,

    /// The reason the model stopped generating.
    pub finish_reason: Option<FinishReason>,

    /// Token usage statistics.
    pub usage: Option<Usage>,
}

impl Response {
    /// Create a model response holding a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            content: Content::model(text),
            ..Default::default()
        }
    }

    /// The concatenated text of the candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        self.content.text()
    }

    /// The role of the candidate content.
    pub fn role(&self) -> Role {
        self.content.role
    }
}

/// The reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Natural stop point or stop sequence.
    Stop,
    /// The token limit was reached.
    MaxTokens,
    /// The candidate was flagged for safety.
    Safety,
    /// The candidate was flagged for recitation.
    Recitation,
    /// Any other reason.
    #[serde(other)]
    Other,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Usage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the candidate.
    pub completion_tokens: u32,
    /// Total tokens.
    pub total_tokens: u32,
}
