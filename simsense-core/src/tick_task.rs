// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task bound to an owner's cancellation scope.

use core::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a spawned Tokio task with cooperative cancellation.
///
/// The task receives a child of the owner's [`CancellationToken`]: it stops
/// when the owner's scope is cancelled, when [`cancel`](Self::cancel) is
/// called, or when the handle is dropped. Cancelling a task never cancels
/// its owner.
///
/// # Example
///
/// ```rust
/// use simsense_core::{CancellationToken, TickTask};
///
/// # #[tokio::main]
/// # async fn main() {
/// let scope = CancellationToken::new();
/// let task = TickTask::spawn(&scope, |cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// scope.cancel();
/// assert!(task.is_cancelled());
/// task.stop().await;
/// # }
/// ```
#[derive(Debug)]
pub struct TickTask {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TickTask {
    /// Spawn `f` on the current Tokio runtime under a child of `scope`.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn<F, Fut>(scope: &CancellationToken, f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = scope.child_token();
        let handle = tokio::spawn(f(cancel.clone()));

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Signal the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel the task and wait until it has returned.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TickTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
