//! Chat session.
//!
//! [`Chat`] owns a [`Model`], the [`GenerationConfig`] and the context
//! history. Each call sends the whole history plus the new turn; the
//! history only grows when the model answers.

use crate::{
    GenerationConfig,
    model::{Content, Model, Response, Role},
};
use anyhow::Result;

/// A conversation session with a model.
#[derive(Clone)]
pub struct Chat<M: Model> {
    /// Context history, oldest first.
    pub history: Vec<Content>,

    /// The model.
    model: M,

    /// The generation config.
    config: GenerationConfig,
}

impl<M: Model> Chat<M> {
    /// Start a new session with an empty history.
    pub fn new(model: M, config: GenerationConfig) -> Self {
        Self {
            history: Vec::new(),
            model,
            config,
        }
    }

    /// Seed the session with prior history.
    pub fn with_history(mut self, history: Vec<Content>) -> Self {
        self.history = history;
        self
    }

    /// Send a content and wait for the complete reply.
    ///
    /// On success the sent content and the reply are appended to the
    /// history. On failure the history is left untouched.
    pub async fn send(&mut self, content: Content) -> Result<Response> {
        let mut contents = self.history.clone();
        contents.push(content.clone());
        let request = self.config.request(contents);
        let response = self.model.send(&request).await?;

        self.history.push(content);
        self.history.push(Content {
            role: Role::Model,
            parts: response.content.parts.clone(),
        });
        Ok(response)
    }

    /// Send a text message and wait for the complete reply.
    pub async fn send_text(&mut self, text: impl Into<String>) -> Result<Response> {
        self.send(Content::user(text)).await
    }
}
