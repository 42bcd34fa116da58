// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::channel::mpsc::UnboundedReceiver;
use futures::stream::{FusedStream, Stream};

/// One subscriber's view of a [`StateSubject`](crate::StateSubject).
///
/// Yields the subject's value at subscription time first, then every later
/// update in publication order. Ends when the subject is closed. Dropping the
/// subscription unsubscribes; the subject and other subscribers are unaffected.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(rx: UnboundedReceiver<T>) -> Self {
        Self { rx }
    }

    /// Stops delivery to this subscriber.
    ///
    /// Equivalent to dropping the subscription; provided so call sites can
    /// make the end of a subscription explicit.
    pub fn unsubscribe(mut self) {
        self.rx.close();
    }

    /// Takes the next already-delivered item without waiting.
    ///
    /// Returns `None` if nothing is queued or the subscription has ended.
    pub fn try_next(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl<T> FusedStream for Subscription<T> {
    fn is_terminated(&self) -> bool {
        self.rx.is_terminated()
    }
}
