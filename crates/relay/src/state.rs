//! Observable relay state guarded by an epoch.
//!
//! Every dispatch captures the epoch when it is called. `reset` bumps the
//! epoch and replaces the value under the channel lock; a publish from an
//! older epoch is then refused under that same lock, so a stale dispatch
//! can never overwrite a reset.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

pub(crate) struct State<S> {
    tx: watch::Sender<S>,
    epoch: AtomicU64,
}

impl<S> State<S> {
    pub fn new(initial: S) -> Self {
        Self {
            tx: watch::Sender::new(initial),
            epoch: AtomicU64::new(0),
        }
    }

    /// The current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch() == epoch
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Apply `update` if `epoch` is still current. Returns whether it was
    /// applied; observers are only notified when it was.
    pub fn publish(&self, epoch: u64, update: impl FnOnce(&mut S)) -> bool {
        self.tx.send_if_modified(|value| {
            if !self.is_current(epoch) {
                return false;
            }
            update(value);
            true
        })
    }

    /// Start a new epoch and replace the value.
    pub fn reset(&self, value: S) {
        self.tx.send_modify(|current| {
            self.epoch.fetch_add(1, Ordering::AcqRel);
            *current = value;
        });
    }
}
