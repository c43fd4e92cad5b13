//! Relays between a user and a generation [`Model`](pcore::Model).
//!
//! Each relay forwards a request, then republishes the result as typed
//! state that hosts observe through a [`tokio::sync::watch`] channel:
//!
//! - [`PromptRelay`]: one prompt, streamed reply accumulated into an
//!   [`Outcome`].
//! - [`ChatRelay`]: turn-based conversation kept as a [`History`].
//! - [`MultimodalRelay`]: prompt plus images, one-shot reply.
//!
//! Calls on one relay are served one at a time in arrival order.
//! `reset`/`clear` discard whatever was submitted before them: a dispatch
//! still running stops publishing.

pub use {
    chat::ChatRelay,
    conversation::{Author, GREETING, History, Turn},
    multimodal::MultimodalRelay,
    outcome::Outcome,
    prompt::PromptRelay,
    task::{ImageTask, TextTask, prompt_text},
};

mod chat;
mod conversation;
mod multimodal;
mod outcome;
mod prompt;
mod state;
mod task;
