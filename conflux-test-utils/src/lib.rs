// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the conflux workspace.
//!
//! Provides push-style channels that produce flows (`test_channel`,
//! `test_channel_with_errors`), stream assertion helpers with timeouts,
//! and latency fixtures for exercising completion-order races. For use in
//! development and testing only.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod helpers;
pub mod latency;

use conflux_core::StreamItem;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{
    assert_no_element_emitted, assert_stream_ended, unwrap_stream, unwrap_value,
};
pub use latency::{staggered, InjectedError};

/// Creates a test channel whose receiving side is a flow.
///
/// Values sent on the sender arrive wrapped in `StreamItem::Value`;
/// dropping the sender ends the flow cleanly.
///
/// # Example
///
/// ```rust
/// use conflux_test_utils::{test_channel, unwrap_stream};
///
/// # async fn example() {
/// let (tx, mut flow) = test_channel::<i32>();
/// tx.send(7).unwrap();
/// assert_eq!(unwrap_stream(&mut flow, 100).await.unwrap(), 7);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let flow = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, flow)
}

/// Creates a test channel that accepts `StreamItem<T>` directly, for
/// injecting errors into a flow.
///
/// # Example
///
/// ```rust
/// use conflux_core::{ConfluxError, StreamItem};
/// use conflux_test_utils::{test_channel_with_errors, unwrap_stream};
///
/// # async fn example() {
/// let (tx, mut flow) = test_channel_with_errors::<i32>();
/// tx.send(StreamItem::Value(1)).unwrap();
/// tx.send(StreamItem::Error(ConfluxError::upstream_error("boom")))
///     .unwrap();
/// assert!(unwrap_stream(&mut flow, 100).await.is_value());
/// assert!(unwrap_stream(&mut flow, 100).await.is_error());
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
