// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{Stream, StreamExt};
use simsense_core::Reading;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::sleep;

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected item emitted, expected no output: {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

pub async fn expect_next_reading<S>(stream: &mut S, raw_value: i32, bias: i32)
where
    S: Stream<Item = Reading> + Unpin,
{
    let reading = stream.next().await.expect("expected next reading");
    assert_eq!(reading, Reading::new(raw_value, bias));
}

pub async fn expect_next_value<S, T>(stream: &mut S, expected: T)
where
    S: Stream<Item = T> + Unpin,
    T: PartialEq + Debug,
{
    let item = stream.next().await.expect("expected next item");
    assert_eq!(item, expected);
}

/// Waits up to `timeout_ms` for the stream to end.
pub async fn expect_stream_end<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            assert!(item.is_none(), "expected end of stream, got {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("stream did not end within {timeout_ms}ms");
        }
    }
}
