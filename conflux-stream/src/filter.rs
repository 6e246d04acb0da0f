// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::StreamItem;
use futures::future::ready;
use futures::{Stream, StreamExt};

/// Extension trait providing the `filter_items` operator for flows.
pub trait FilterItemsExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Keeps only the items for which the predicate holds.
    ///
    /// Errors are passed through unchanged; filtering never consumes a
    /// failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conflux_stream::{flow_from_iter, CollectValuesExt, FilterItemsExt};
    ///
    /// # async fn example() -> conflux_core::Result<()> {
    /// let evens = flow_from_iter([1, 2, 3, 4])
    ///     .filter_items(|&n| n % 2 == 0)
    ///     .collect_values()
    ///     .await?;
    /// assert_eq!(evens, vec![2, 4]);
    /// # Ok(())
    /// # }
    /// ```
    fn filter_items<P>(self, predicate: P) -> impl Stream<Item = StreamItem<T>>
    where
        P: FnMut(&T) -> bool;
}

impl<S, T> FilterItemsExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn filter_items<P>(self, mut predicate: P) -> impl Stream<Item = StreamItem<T>>
    where
        P: FnMut(&T) -> bool,
    {
        self.filter_map(move |item| {
            ready(match item {
                StreamItem::Value(value) if predicate(&value) => Some(StreamItem::Value(value)),
                StreamItem::Value(_) => None,
                StreamItem::Error(err) => Some(StreamItem::Error(err)),
            })
        })
    }
}
