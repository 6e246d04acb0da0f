// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::StreamItem;
use futures::{Stream, StreamExt};
use std::time::Duration;
use tokio::time::sleep;

/// Waits for the next item, panicking if the stream ends or the timeout
/// elapses first.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> StreamItem<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    tokio::select! {
        item = stream.next() => item.expect("stream ended while an item was expected"),
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("timed out after {timeout_ms}ms waiting for an item")
        }
    }
}

/// Extracts the value from an optional stream item, panicking on `None` or
/// an error item.
pub fn unwrap_value<T>(item: Option<StreamItem<T>>) -> T {
    match item {
        Some(StreamItem::Value(value)) => value,
        Some(StreamItem::Error(err)) => panic!("expected a value, got error: {err}"),
        None => panic!("expected a value, stream had ended"),
    }
}

/// Asserts that the stream ends (yields `None`) within the timeout.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    tokio::select! {
        item = stream.next() => {
            assert!(item.is_none(), "expected the stream to end, got an item");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("timed out after {timeout_ms}ms waiting for the stream to end")
        }
    }
}

/// Asserts that the stream emits nothing for the whole timeout window.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        item = stream.next() => {
            match item {
                Some(_) => panic!("unexpected item emitted, expected no output"),
                None => panic!("stream ended, expected it to stay silent"),
            }
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}
