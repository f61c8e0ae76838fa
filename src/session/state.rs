//! Observable current-user cell
//!
//! One `SessionState` belongs to one session service. Readers either take a
//! snapshot with [`SessionState::current`] or subscribe and receive the
//! current value followed by every later change, in order.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::client::models::UserIdentity;

type Snapshot = Option<UserIdentity>;

#[derive(Default)]
struct Inner {
    current: Snapshot,
    subscribers: Vec<UnboundedSender<Snapshot>>,
}

/// Shared handle to the current-user cell
#[derive(Clone, Default)]
pub struct SessionState {
    inner: Arc<Mutex<Inner>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current user, if any
    pub fn current(&self) -> Snapshot {
        self.lock().current.clone()
    }

    /// Subscribe to changes; the current value is delivered first
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = unbounded_channel();
        let mut inner = self.lock();
        // Under the lock, so no mutation can slip between replay and registration
        let _ = tx.send(inner.current.clone());
        inner.subscribers.push(tx);
        Subscription { rx }
    }

    /// Replace the current user and notify subscribers.
    ///
    /// Only the owning session service calls this.
    pub(crate) fn set(&self, user: Snapshot) {
        let mut inner = self.lock();
        log::debug!(
            "Session user -> {}",
            user.as_ref().map_or("<none>", |u| u.display_name())
        );
        inner.current = user;
        let value = inner.current.clone();
        // Dropped subscribers fail to send and are pruned
        inner.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }

    /// Number of live subscriptions
    #[allow(dead_code)]
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.subscribers.retain(|tx| !tx.is_closed());
        inner.subscribers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Poisoning leaves a whole value behind; keep using it
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("current", &self.current())
            .finish()
    }
}

/// Stream of current-user values
#[derive(Debug)]
pub struct Subscription {
    rx: UnboundedReceiver<Snapshot>,
}

impl Subscription {
    /// Next value; `None` once the state has been dropped
    #[allow(dead_code)]
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }

    /// Next value if one is already queued
    pub fn try_next(&mut self) -> Option<Snapshot> {
        self.rx.try_recv().ok()
    }

    /// Drain everything queued and keep the most recent value
    pub fn latest(&mut self) -> Option<Snapshot> {
        std::iter::from_fn(|| self.try_next()).last()
    }
}

impl Stream for Subscription {
    type Item = Snapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
