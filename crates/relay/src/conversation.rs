//! Conversation turns and history.

use ulid::Ulid;

/// The turn every conversation starts with.
pub const GREETING: &str = "Hi, there. What would you like to know?";

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Author {
    /// The person chatting.
    User,
    /// The model.
    Model,
    /// A failure surfaced into the conversation.
    Error,
}

/// One message in a conversation.
///
/// Only the pending flag ever changes, and only from pending to resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Unique identifier.
    pub id: Ulid,
    /// Message text.
    pub text: String,
    /// Who wrote it.
    pub author: Author,
    pending: bool,
}

impl Turn {
    fn new(author: Author, text: impl Into<String>, pending: bool) -> Self {
        Self {
            id: Ulid::new(),
            text: text.into(),
            author,
            pending,
        }
    }

    /// A user turn awaiting the model's reply.
    pub fn pending(text: impl Into<String>) -> Self {
        Self::new(Author::User, text, true)
    }

    /// A resolved user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text, false)
    }

    /// A model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Author::Model, text, false)
    }

    /// An error turn.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Author::Error, text, false)
    }

    /// Whether the turn still awaits a reply.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Ordered conversation turns, oldest first.
///
/// Append-only apart from resolving pending turns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    /// A history holding only the [`GREETING`].
    pub fn greeting() -> Self {
        Self {
            turns: vec![Turn::model(GREETING)],
        }
    }

    /// Append a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Resolve the turn with this id. Returns whether it was pending.
    pub fn resolve(&mut self, id: Ulid) -> bool {
        match self.turns.iter_mut().find(|turn| turn.id == id) {
            Some(turn) if turn.pending => {
                turn.pending = false;
                true
            }
            _ => false,
        }
    }

    /// Number of pending turns.
    pub fn pending_count(&self) -> usize {
        self.turns.iter().filter(|turn| turn.pending).count()
    }

    /// The turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The newest turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether there are no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Iterate over the turns, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
