// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::ready;
use futures::stream::Stream;

/// Extension trait providing the `distinct_until_changed` operator.
pub trait DistinctUntilChangedExt: Stream + Sized {
    /// Drops items equal to the item emitted just before them.
    ///
    /// ```
    /// use simsense_core::DistinctUntilChangedExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let values: Vec<i32> = stream::iter([1, 1, 2, 2, 1])
    ///     .distinct_until_changed()
    ///     .collect()
    ///     .await;
    /// assert_eq!(values, vec![1, 2, 1]);
    /// # }
    /// ```
    fn distinct_until_changed(self) -> DistinctUntilChanged<Self>
    where
        Self::Item: PartialEq + Clone,
    {
        DistinctUntilChanged {
            inner: self,
            last: None,
        }
    }
}

impl<S: Stream> DistinctUntilChangedExt for S {}

#[derive(Debug)]
pub struct DistinctUntilChanged<S: Stream> {
    inner: S,
    last: Option<S::Item>,
}

impl<S> Stream for DistinctUntilChanged<S>
where
    S: Stream + Unpin,
    S::Item: PartialEq + Clone + Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                Some(item) if this.last.as_ref() == Some(&item) => {}
                Some(item) => {
                    this.last = Some(item.clone());
                    return Poll::Ready(Some(item));
                }
                None => return Poll::Ready(None),
            }
        }
    }
}
