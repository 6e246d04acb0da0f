// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::StreamItem;
use futures::{stream, Stream, StreamExt};

/// Extension trait providing the `flat_map_items` operator for flows.
pub trait FlatMapItemsExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Expands each item into zero or more outputs, emitted in order.
    ///
    /// The expansion of one item is fully emitted before the next item is
    /// considered, so output order is a function of input order. Errors are
    /// passed through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conflux_stream::{flow_from_iter, CollectValuesExt, FlatMapItemsExt};
    ///
    /// # async fn example() -> conflux_core::Result<()> {
    /// let repeated = flow_from_iter([1, 2])
    ///     .flat_map_items(|n| vec![n; n])
    ///     .collect_values()
    ///     .await?;
    /// assert_eq!(repeated, vec![1, 2, 2]);
    /// # Ok(())
    /// # }
    /// ```
    fn flat_map_items<U, I, F>(self, f: F) -> impl Stream<Item = StreamItem<U>>
    where
        F: FnMut(T) -> I,
        I: IntoIterator<Item = U>;
}

impl<S, T> FlatMapItemsExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn flat_map_items<U, I, F>(self, mut f: F) -> impl Stream<Item = StreamItem<U>>
    where
        F: FnMut(T) -> I,
        I: IntoIterator<Item = U>,
    {
        self.flat_map(move |item| {
            let expanded: Vec<StreamItem<U>> = match item {
                StreamItem::Value(value) => f(value).into_iter().map(StreamItem::Value).collect(),
                StreamItem::Error(err) => vec![StreamItem::Error(err)],
            };
            stream::iter(expanded)
        })
    }
}
