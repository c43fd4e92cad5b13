//! Generation configuration shared by every relay.

use crate::model::{Content, Request};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// The model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// The sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Generation configuration.
///
/// Fixed for the lifetime of a relay; relays never expose it for tuning.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// The model identifier.
    #[serde(default = "default_model")]
    pub model: CompactString,

    /// The sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl GenerationConfig {
    /// Create a configuration for the given model with the default temperature.
    pub fn new(model: impl Into<CompactString>) -> Self {
        Self {
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build a request carrying this configuration and the given contents.
    pub fn request(&self, contents: Vec<Content>) -> Request {
        Request::new(self.model.clone())
            .with_temperature(self.temperature)
            .with_contents(contents)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

fn default_model() -> CompactString {
    DEFAULT_MODEL.into()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}
