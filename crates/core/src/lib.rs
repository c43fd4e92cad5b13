//! Core abstractions for pisces.
//!
//! - [`model`]: content, request and response types plus the [`Model`] trait
//!   every generation backend implements.
//! - [`Chat`]: a conversation session that carries context between turns.
//! - [`GenerationConfig`]: model name and sampling temperature.

pub use {
    chat::Chat,
    config::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerationConfig},
    model::{Content, FinishReason, Image, Model, Part, Request, Response, Role, Usage},
};

mod chat;
mod config;
pub mod model;
#[cfg(feature = "testing")]
pub mod testing;
