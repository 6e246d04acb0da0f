// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Convenience constructors for creating flows from tokio channels.

use crate::ConfluxStream;
use conflux_core::StreamItem;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Extension trait to convert tokio channels into a [`ConfluxStream`].
pub trait ReceiverFlowExt<T> {
    /// Converts this receiver into a flow.
    ///
    /// Each item received from the channel is wrapped in
    /// [`StreamItem::Value`]; dropping the sender ends the flow cleanly.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conflux_stream::ReceiverFlowExt;
    /// use tokio::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::unbounded_channel::<i32>();
    /// let flow = rx.into_flow_stream();
    /// ```
    fn into_flow_stream(self) -> ConfluxStream<Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>>;
}

impl<T: Send + 'static> ReceiverFlowExt<T> for UnboundedReceiver<T> {
    fn into_flow_stream(self) -> ConfluxStream<Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>> {
        ConfluxStream::new(Box::pin(
            UnboundedReceiverStream::new(self).map(StreamItem::Value),
        ))
    }
}
