//! Turn-based chat relay.

use crate::{History, Turn, state::State};
use pcore::{Chat, GenerationConfig, Model};
use std::sync::Arc;
use tokio::{
    sync::{Mutex, watch},
    task::JoinHandle,
};

/// Keeps a conversation with a model as an observable [`History`].
///
/// Each message is appended as a pending user turn. When the model
/// answers the turn is resolved and the reply appended; when it fails the
/// turn is resolved and an error turn appended instead.
///
/// The relay owns one [`Chat`] session for its lifetime. [`clear`](Self::clear)
/// restarts the visible history only; the model keeps the context of every
/// exchange it answered.
pub struct ChatRelay<M: Model> {
    inner: Arc<Inner<M>>,
}

struct Inner<M: Model> {
    state: State<History>,
    session: Mutex<Chat<M>>,
}

impl<M: Model> Clone for ChatRelay<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<M: Model + Send + Sync + 'static> ChatRelay<M> {
    /// Create a relay holding only the greeting.
    pub fn new(model: M, config: GenerationConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: State::new(History::greeting()),
                session: Mutex::new(Chat::new(model, config)),
            }),
        }
    }

    /// Observe history changes.
    pub fn subscribe(&self) -> watch::Receiver<History> {
        self.inner.state.subscribe()
    }

    /// The current history.
    pub fn history(&self) -> History {
        self.inner.state.snapshot()
    }

    /// Send a message and wait for the reply or the failure to land in
    /// the history.
    pub async fn send(&self, text: &str) {
        self.dispatch(self.inner.state.epoch(), text).await
    }

    async fn dispatch(&self, epoch: u64, text: &str) {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;
        let turn = Turn::pending(text);
        let id = turn.id;
        if !inner.state.publish(epoch, |history| history.push(turn)) {
            tracing::debug!("chat message discarded before dispatch");
            return;
        }

        let result = session.send_text(text).await;
        let published = inner.state.publish(epoch, |history| {
            history.resolve(id);
            match result {
                Ok(response) => {
                    if let Some(reply) = response.text() {
                        history.push(Turn::model(reply));
                    }
                }
                Err(e) => {
                    tracing::error!("chat send failed: {e:?}");
                    history.push(Turn::error(e.to_string()));
                }
            }
        });
        if !published {
            tracing::debug!("chat cleared while waiting, reply dropped");
        }
    }

    /// Run [`send`](Self::send) on the tokio runtime.
    pub fn spawn_send(&self, text: impl Into<String>) -> JoinHandle<()> {
        let relay = self.clone();
        let epoch = self.inner.state.epoch();
        let text = text.into();
        tokio::spawn(async move { relay.dispatch(epoch, &text).await })
    }

    /// Restart the visible conversation from the greeting.
    ///
    /// A message in flight publishes nothing into the new history.
    pub fn clear(&self) {
        tracing::debug!("chat cleared");
        self.inner.state.reset(History::greeting());
    }
}
