//! Request outcome.

/// The state of the current request of a relay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Nothing requested yet, or reset.
    #[default]
    Idle,
    /// Waiting for the model.
    InProgress,
    /// Text generated so far; final once the request completes.
    Success(String),
    /// The request failed with this message.
    Failure(String),
}

impl Outcome {
    /// The generated text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}
