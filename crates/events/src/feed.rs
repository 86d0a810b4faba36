//! The change subscription contract.
//!
//! A [`ChangeFeed`] invokes a callback for every change it observes, without
//! saying what changed; subscribers are expected to re-read whatever they
//! display. The returned [`Subscription`] stops delivery when it is dropped
//! or explicitly unsubscribed.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use crate::bus::EventBus;

/// Callback fired once per observed change.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Source of "something changed" signals.
pub trait ChangeFeed: Send + Sync {
    /// Start calling `on_change` for every change from now on.
    ///
    /// Must be called from within a Tokio runtime.
    fn subscribe(&self, on_change: ChangeCallback) -> Subscription;
}

/// Handle to an active feed subscription.
#[derive(Debug)]
#[must_use = "dropping a Subscription stops delivery immediately"]
pub struct Subscription {
    cancel: CancellationToken,
}

impl Subscription {
    /// Wrap the token the delivering task watches.
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Stop delivery. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl ChangeFeed for EventBus {
    fn subscribe(&self, on_change: ChangeCallback) -> Subscription {
        // Take the receiver before spawning so nothing published after this
        // call returns is missed.
        let mut rx = self.receiver();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    received = rx.recv() => match received {
                        Ok(_) => on_change(),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Change subscriber lagged, reloading once");
                            on_change();
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            tracing::debug!("Change subscription ended");
        });

        Subscription::new(cancel)
    }
}
