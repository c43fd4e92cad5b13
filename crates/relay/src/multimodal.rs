//! Prompt-plus-images relay.

use crate::{Outcome, prompt_text, state::State};
use futures_util::future::join_all;
use pcore::{Content, GenerationConfig, Model, Role};
use pimage::{ImageRef, Loader, Resolve};
use std::sync::Arc;
use tokio::{
    sync::{Mutex, watch},
    task::JoinHandle,
};

/// Sends a question with images attached and waits for the whole reply.
///
/// Images that fail to resolve are dropped with a warning; the question
/// is still sent with whatever images remain, possibly none.
pub struct MultimodalRelay<M, R = Loader> {
    inner: Arc<Inner<M, R>>,
}

struct Inner<M, R> {
    model: M,
    config: GenerationConfig,
    resolver: R,
    state: State<Outcome>,
    serial: Mutex<()>,
}

impl<M, R> Clone for MultimodalRelay<M, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<M, R> MultimodalRelay<M, R>
where
    M: Model + Send + Sync + 'static,
    R: Resolve + 'static,
{
    /// Create an idle relay.
    pub fn new(model: M, config: GenerationConfig, resolver: R) -> Self {
        Self {
            inner: Arc::new(Inner {
                model,
                config,
                resolver,
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

    /// Resolve `images`, send them followed by the question, and publish
    /// the reply.
    pub async fn reason(&self, preamble: &str, question: &str, images: &[ImageRef]) {
        self.dispatch(self.inner.state.epoch(), preamble, question, images)
            .await
    }

    async fn dispatch(&self, epoch: u64, preamble: &str, question: &str, images: &[ImageRef]) {
        let inner = &self.inner;
        let _serial = inner.serial.lock().await;
        if !inner.state.publish(epoch, |outcome| *outcome = Outcome::InProgress) {
            tracing::debug!("reasoning discarded before dispatch");
            return;
        }

        let resolved = join_all(images.iter().map(|image| inner.resolver.resolve(image))).await;
        let mut attached = Vec::with_capacity(resolved.len());
        for (reference, result) in images.iter().zip(resolved) {
            match result {
                Ok(image) => attached.push(image),
                Err(e) => tracing::warn!("dropping image {reference}: {e}"),
            }
        }
        tracing::debug!(
            "reasoning dispatch: {} of {} images attached",
            attached.len(),
            images.len()
        );

        let content = Content::builder(Role::User)
            .images(attached)
            .text(prompt_text(preamble, question))
            .build();
        let request = inner.config.request(vec![content]);
        let outcome = match inner.model.send(&request).await {
            Ok(response) => Outcome::Success(response.text().unwrap_or_default()),
            Err(e) => {
                tracing::error!("reasoning failed: {e:?}");
                Outcome::Failure(e.to_string())
            }
        };
        if !inner.state.publish(epoch, |current| *current = outcome) {
            tracing::debug!("reasoning cleared while waiting, reply dropped");
        }
    }

    /// Run [`reason`](Self::reason) on the tokio runtime.
    pub fn spawn_reason(
        &self,
        preamble: impl Into<String>,
        question: impl Into<String>,
        images: Vec<ImageRef>,
    ) -> JoinHandle<()> {
        let relay = self.clone();
        let epoch = self.inner.state.epoch();
        let (preamble, question) = (preamble.into(), question.into());
        tokio::spawn(async move {
            relay
                .dispatch(epoch, &preamble, &question, &images)
                .await
        })
    }

    /// Return to [`Outcome::Idle`], discarding any dispatch in flight.
    pub fn clear(&self) {
        tracing::debug!("reasoning cleared");
        self.inner.state.reset(Outcome::Idle);
    }
}
