//! Streaming prompt relay.

use crate::{Outcome, prompt_text, state::State};
use futures_util::StreamExt;
use pcore::{Content, GenerationConfig, Model};
use std::sync::Arc;
use tokio::{
    sync::{Mutex, watch},
    task::JoinHandle,
};

/// Forwards one prompt at a time and accumulates the streamed reply.
///
/// Every chunk publishes the full text so far as [`Outcome::Success`];
/// a failure at any point publishes [`Outcome::Failure`] and ends the
/// dispatch.
pub struct PromptRelay<M> {
    inner: Arc<Inner<M>>,
}

struct Inner<M> {
    model: M,
    config: GenerationConfig,
    state: State<Outcome>,
    serial: Mutex<()>,
}

impl<M> Clone for PromptRelay<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<M: Model + Send + Sync + 'static> PromptRelay<M> {
    /// Create an idle relay.
    pub fn new(model: M, config: GenerationConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                model,
                config,
                state: State::new(Outcome::Idle),
                serial: Mutex::new(()),
            }),
        }
    }

    /// Observe outcome changes.
    pub fn subscribe(&self) -> watch::Receiver<Outcome> {
        self.inner.state.subscribe()
    }

    /// The current outcome.
    pub fn outcome(&self) -> Outcome {
        self.inner.state.snapshot()
    }

    /// Send `body`, prefixed with `prefix` unless it is blank, and stream
    /// the reply into the outcome.
    ///
    /// Resolves once the dispatch finished, failed or was discarded by
    /// [`reset`](Self::reset).
    pub async fn submit(&self, prefix: &str, body: &str) {
        self.dispatch(self.inner.state.epoch(), prefix, body).await
    }

    async fn dispatch(&self, epoch: u64, prefix: &str, body: &str) {
        let inner = &self.inner;
        let _serial = inner.serial.lock().await;
        if !inner.state.publish(epoch, |outcome| *outcome = Outcome::InProgress) {
            tracing::debug!("prompt discarded before dispatch");
            return;
        }

        let prompt = prompt_text(prefix, body);
        tracing::debug!("prompt dispatch: {} chars", prompt.len());
        let request = inner.config.request(vec![Content::user(prompt)]);
        let stream = inner.model.stream(request);
        futures_util::pin_mut!(stream);

        let (mut text, mut chunks) = (String::new(), 0usize);
        while let Some(result) = stream.next().await {
            match result {
                Ok(chunk) => {
                    chunks += 1;
                    if let Some(delta) = chunk.text() {
                        text.push_str(&delta);
                    }
                    let snapshot = text.clone();
                    if !inner
                        .state
                        .publish(epoch, |outcome| *outcome = Outcome::Success(snapshot))
                    {
                        tracing::debug!("prompt reset mid-stream, dropping the rest");
                        return;
                    }
                }
                Err(e) => {
                    tracing::error!("prompt stream failed: {e:?}");
                    inner
                        .state
                        .publish(epoch, |outcome| *outcome = Outcome::Failure(e.to_string()));
                    return;
                }
            }
        }

        if chunks == 0 {
            inner
                .state
                .publish(epoch, |outcome| *outcome = Outcome::Success(text));
        }
    }

    /// Run [`submit`](Self::submit) on the tokio runtime.
    ///
    /// The call is ordered, and subject to [`reset`](Self::reset), from
    /// the moment this returns.
    pub fn spawn_submit(
        &self,
        prefix: impl Into<String>,
        body: impl Into<String>,
    ) -> JoinHandle<()> {
        let relay = self.clone();
        let epoch = self.inner.state.epoch();
        let (prefix, body) = (prefix.into(), body.into());
        tokio::spawn(async move { relay.dispatch(epoch, &prefix, &body).await })
    }

    /// Return to [`Outcome::Idle`], discarding any dispatch in flight.
    pub fn reset(&self) {
        tracing::debug!("prompt reset");
        self.inner.state.reset(Outcome::Idle);
    }
}
