//! Scripted model for tests.
//!
//! [`Scripted`] answers each call with the next queued [`Script`] and
//! records every request it receives, so relay and session logic can be
//! exercised without a network.

use crate::model::{Model, Request, Response};
use anyhow::{Result, anyhow};
use futures_core::Stream;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use tokio::sync::Notify;

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Script {
    /// Answer with these chunks (joined for one-shot calls).
    Chunks(Vec<String>),
    /// Fail before producing anything.
    Fail(String),
    /// Produce these chunks, then fail.
    FailAfter(Vec<String>, String),
    /// Produce the first chunk, wait for the gate, then produce the rest.
    ///
    /// One-shot calls wait for the gate before answering.
    Hold(Vec<String>, Arc<Notify>),
}

impl Script {
    /// A single-chunk answer.
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Chunks(vec![text.into()])
    }

    /// A multi-chunk answer.
    pub fn chunks<S: Into<String>>(chunks: impl IntoIterator<Item = S>) -> Self {
        Self::Chunks(chunks.into_iter().map(Into::into).collect())
    }
}

/// A model answering from a queue of scripts.
#[derive(Clone, Default)]
pub struct Scripted {
    scripts: Arc<Mutex<VecDeque<Script>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Scripted {
    /// Create a model with an empty script queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model with the given scripts queued in order.
    pub fn with(scripts: impl IntoIterator<Item = Script>) -> Self {
        let model = Self::new();
        for script in scripts {
            model.push(script);
        }
        model
    }

    /// Queue a script.
    pub fn push(&self, script: Script) -> &Self {
        self.scripts.lock().unwrap().push_back(script);
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self, request: &Request) -> Option<Script> {
        self.requests.lock().unwrap().push(request.clone());
        self.scripts.lock().unwrap().pop_front()
    }
}

impl Model for Scripted {
    async fn send(&self, request: &Request) -> Result<Response> {
        match self.next(request) {
            Some(Script::Chunks(chunks)) => Ok(Response::model(chunks.concat())),
            Some(Script::Fail(message)) | Some(Script::FailAfter(_, message)) => {
                Err(anyhow!(message))
            }
            Some(Script::Hold(chunks, gate)) => {
                gate.notified().await;
                Ok(Response::model(chunks.concat()))
            }
            None => Err(anyhow!("no scripted reply")),
        }
    }

    fn stream(&self, request: Request) -> impl Stream<Item = Result<Response>> + Send {
        let script = self.next(&request);
        async_stream::try_stream! {
            match script {
                Some(Script::Chunks(chunks)) => {
                    for chunk in chunks {
                        tokio::task::yield_now().await;
                        yield Response::model(chunk);
                    }
                }
                Some(Script::Fail(message)) => Err(anyhow!(message))?,
                Some(Script::FailAfter(chunks, message)) => {
                    for chunk in chunks {
                        tokio::task::yield_now().await;
                        yield Response::model(chunk);
                    }
                    Err::<(), _>(anyhow!(message))?;
                }
                Some(Script::Hold(chunks, gate)) => {
                    let mut chunks = chunks.into_iter();
                    if let Some(first) = chunks.next() {
                        yield Response::model(first);
                    }
                    gate.notified().await;
                    for chunk in chunks {
                        tokio::task::yield_now().await;
                        yield Response::model(chunk);
                    }
                }
                None => Err(anyhow!("no scripted reply"))?,
            }
        }
    }
}
