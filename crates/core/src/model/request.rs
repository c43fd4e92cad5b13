//! Generation request type.

use crate::model::Content;
use compact_str::CompactString;

/// A generation request.
///
/// Contains everything needed to make a model call. Backends convert this
/// to their wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The model to use.
    pub model: CompactString,

    /// The ordered contents, oldest first.
    pub contents: Vec<Content>,

    /// The sampling temperature.
    pub temperature: Option<f32>,
}

impl Request {
    /// Create a new request for the given model.
    pub fn new(model: impl Into<CompactString>) -> Self {
        Self {
            model: model.into(),
            contents: Vec::new(),
            temperature: None,
        }
    }

    /// Set the contents for this request.
    pub fn with_contents(mut self, contents: Vec<Content>) -> Self {
        self.contents = contents;
        self
    }

    /// Append a content to this request.
    pub fn with_content(mut self, content: Content) -> Self {
        self.contents.push(content);
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The last content of the request, usually the new user turn.
    pub fn last(&self) -> Option<&Content> {
        self.contents.last()
    }
}
