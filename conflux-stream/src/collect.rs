// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use conflux_core::{Result, StreamItem};
use futures::{Stream, StreamExt};

/// Extension trait for draining a flow into a `Vec`.
#[async_trait]
pub trait CollectValuesExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Drains the flow, collecting every value in emission order.
    ///
    /// Returns the first error the flow produces instead; values collected
    /// before the error are discarded.
    async fn collect_values(self) -> Result<Vec<T>>;
}

#[async_trait]
impl<S, T> CollectValuesExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + Unpin,
    T: Send,
{
    async fn collect_values(mut self) -> Result<Vec<T>> {
        let mut values = Vec::new();
        while let Some(item) = self.next().await {
            match item {
                StreamItem::Value(value) => values.push(value),
                StreamItem::Error(err) => return Err(err),
            }
        }
        Ok(values)
    }
}
