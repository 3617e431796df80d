//! Scope liveness tracking for guarded dispatch.
//!
//! A [`Liveness`] marks the lifetime of the scope that owns a store. While
//! the scope is alive, dispatches guarded by its tokens go through; once it
//! retires, every guarded dispatch is discarded. Dropping the owner retires
//! the scope, so teardown cannot be forgotten.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Owner of a liveness scope.
///
/// Create one per owning scope, hand [`LivenessToken`]s to the tasks and
/// stores that should stop once the scope ends, and either call
/// [`retire`](Liveness::retire) explicitly or let the drop do it.
///
/// # Example
///
/// ```rust
/// use tidepool::runner::Liveness;
///
/// let scope = Liveness::new();
/// let token = scope.token();
/// assert!(token.is_live());
///
/// scope.retire();
/// assert!(!token.is_live());
/// ```
pub struct Liveness {
    live: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Liveness {
    /// Create a new live scope.
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Create a token bound to this scope.
    pub fn token(&self) -> LivenessToken {
        LivenessToken {
            live: Arc::clone(&self.live),
            notify: Arc::clone(&self.notify),
        }
    }

    /// Retire the scope.
    ///
    /// Idempotent: only the first call flips the flag and wakes waiters.
    pub fn retire(&self) {
        if self.live.swap(false, Ordering::SeqCst) {
            tracing::debug!(target: "tidepool::liveness", "scope retired");
            self.notify.notify_waiters();
        }
    }

    /// Check whether the scope is still live.
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Liveness {
    fn drop(&mut self) {
        self.retire();
    }
}

/// Lightweight handle for checking scope liveness.
#[derive(Clone)]
pub struct LivenessToken {
    live: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl LivenessToken {
    /// Check whether the owning scope is still live.
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Wait until the owning scope retires.
    ///
    /// Returns immediately if the scope has already retired.
    pub async fn retired(&self) {
        // Subscribe before checking the flag so a retire that lands between
        // the check and the await is not lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if !self.is_live() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scope_is_live() {
        let scope = Liveness::new();
        assert!(scope.is_live());
        assert!(scope.token().is_live());
    }

    #[test]
    fn retire_flips_every_token() {
        let scope = Liveness::new();
        let first = scope.token();
        let second = scope.token();

        scope.retire();

        assert!(!scope.is_live());
        assert!(!first.is_live());
        assert!(!second.is_live());
    }

    #[test]
    fn retire_is_idempotent() {
        let scope = Liveness::new();
        scope.retire();
        scope.retire();
        assert!(!scope.is_live());
    }

    #[test]
    fn drop_retires_scope() {
        let scope = Liveness::new();
        let token = scope.token();

        drop(scope);

        assert!(!token.is_live());
    }

    #[tokio::test]
    async fn retired_wakes_waiters() {
        let scope = Liveness::new();
        let token = scope.token();

        let waiter = tokio::spawn(async move { token.retired().await });
        scope.retire();

        waiter.await.expect("waiter should finish");
    }

    #[tokio::test]
    async fn retired_returns_immediately_after_retire() {
        let scope = Liveness::new();
        let token = scope.token();
        scope.retire();

        token.retired().await;
    }
}
