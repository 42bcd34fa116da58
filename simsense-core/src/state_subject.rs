// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Latest-value, multi-subscriber subject.
//!
//! A [`StateSubject`] owns exactly one current value and broadcasts every
//! replacement to all active subscribers.
//!
//! ## Characteristics
//!
//! - **Replaying**: a new subscriber receives the current value immediately.
//! - **Serialized**: updates are applied and fanned out under one lock, so all
//!   subscribers observe the same total order.
//! - **Unbounded**: per-subscriber unbounded channels (no backpressure).
//! - **Cheap to clone**: all clones share the same state.
//! - **Close**: ends every subscription; later subscriptions end at once.
//!
//! ## Example
//!
//! ```
//! use simsense_core::StateSubject;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = StateSubject::new(1);
//! let mut stream = subject.subscribe();
//!
//! subject.replace(2).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(1));
//! assert_eq!(stream.next().await, Some(2));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::Subscription;
use futures::channel::mpsc::{self, UnboundedSender};
use parking_lot::Mutex;
use simsense_error::{Result, SimError};
use std::sync::Arc;

struct SubjectState<T> {
    current: T,
    closed: bool,
    senders: Vec<UnboundedSender<T>>,
}

/// A replaying subject holding a single current value.
///
/// See the [module documentation](self) for details.
pub struct StateSubject<T: Clone + Send + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> StateSubject<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                current: initial,
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Snapshot of the current value. Never waits on subscribers.
    #[must_use]
    pub fn current(&self) -> T {
        self.state.lock().current.clone()
    }

    /// Subscribe to the current value and all later replacements.
    ///
    /// On a closed subject the returned subscription is already finished.
    pub fn subscribe(&self) -> Subscription<T> {
        let mut state = self.state.lock();
        let (tx, rx) = mpsc::unbounded();

        if !state.closed && tx.unbounded_send(state.current.clone()).is_ok() {
            state.senders.push(tx);
        }

        Subscription::new(rx)
    }

    /// Replace the current value with one derived from it, then broadcast.
    ///
    /// The derivation runs under the subject's lock; concurrent updates are
    /// applied one after another and never interleave.
    ///
    /// The value is stored even when the subject is closed, so readers of
    /// [`current`](Self::current) keep seeing the latest state.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::SubscriptionClosed`] if the subject has been closed.
    pub fn update<F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&T) -> T,
    {
        let mut state = self.state.lock();
        let next = f(&state.current);
        state.current = next.clone();

        if state.closed {
            return Err(SimError::SubscriptionClosed);
        }

        state
            .senders
            .retain(|tx| tx.unbounded_send(next.clone()).is_ok());

        Ok(next)
    }

    /// Replace the current value and broadcast it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::SubscriptionClosed`] if the subject has been closed.
    pub fn replace(&self, value: T) -> Result<T> {
        self.update(|_| value)
    }

    /// Ends every subscription. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of subscribers that have not been dropped yet.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.state.lock();
        state.senders.retain(|tx| !tx.is_closed());
        state.senders.len()
    }
}

impl<T: Clone + Send + 'static> Clone for StateSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + Send + core::fmt::Debug + 'static> core::fmt::Debug for StateSubject<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("StateSubject")
            .field("current", &state.current)
            .field("closed", &state.closed)
            .field("subscribers", &state.senders.len())
            .finish()
    }
}
