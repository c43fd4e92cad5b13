//! Conversation content: roles, parts and images.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// The author of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum Role {
    /// The user role
    #[serde(rename = "user")]
    #[default]
    User,
    /// The model role
    #[serde(rename = "model")]
    Model,
}

/// An encoded image ready to be sent inline with a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    /// MIME type of the encoded bytes, e.g. `image/jpeg`.
    pub mime: CompactString,
    /// The encoded image bytes.
    pub data: Vec<u8>,
    /// Pixel width after decoding.
    pub width: u32,
    /// Pixel height after decoding.
    pub height: u32,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("mime", &self.mime)
            .field("bytes", &self.data.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// One part of a [`Content`].
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Plain text.
    Text(String),
    /// An inline image.
    Image(Image),
}

impl Part {
    /// The text of this part, if it is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            Part::Image(_) => None,
        }
    }
}

/// A single turn of content: a role and its ordered parts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Content {
    /// The author of the content.
    pub role: Role,
    /// The ordered parts.
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user content holding a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Create a model content holding a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Create a new content builder.
    pub fn builder(role: Role) -> ContentBuilder {
        ContentBuilder::new(role)
    }

    /// Concatenate every text part.
    ///
    /// Returns `None` when the content carries no text part at all.
    pub fn text(&self) -> Option<String> {
        let mut texts = self.parts.iter().filter_map(Part::as_text).peekable();
        texts.peek()?;
        Some(texts.collect())
    }

    /// Iterate over the images in this content.
    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.parts.iter().filter_map(|part| match part {
            Part::Image(image) => Some(image),
            Part::Text(_) => None,
        })
    }
}

/// A builder for multi-part content.
pub struct ContentBuilder {
    content: Content,
}

impl ContentBuilder {
    /// Create a new builder for the given role.
    pub fn new(role: Role) -> Self {
        Self {
            content: Content {
                role,
                parts: Vec::new(),
            },
        }
    }

    /// Append a text part.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content.parts.push(Part::Text(text.into()));
        self
    }

    /// Append an image part.
    pub fn image(mut self, image: Image) -> Self {
        self.content.parts.push(Part::Image(image));
        self
    }

    /// Append every image, preserving order.
    pub fn images(mut self, images: impl IntoIterator<Item = Image>) -> Self {
        self.content
            .parts
            .extend(images.into_iter().map(Part::Image));
        self
    }

    /// Build the content.
    pub fn build(self) -> Content {
        self.content
    }
}
