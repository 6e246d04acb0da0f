// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::StreamItem;
use futures::{stream, Stream};

/// Turns a finite collection of values into a flow.
///
/// The counterpart of a generator-backed source: items are produced one at
/// a time, in iteration order, each wrapped in [`StreamItem::Value`], and
/// the flow ends cleanly when the iterator is exhausted.
///
/// # Examples
///
/// ```rust
/// use conflux_stream::{flow_from_iter, CollectValuesExt};
///
/// # async fn example() -> conflux_core::Result<()> {
/// let values = flow_from_iter([1, 2, 3]).collect_values().await?;
/// assert_eq!(values, vec![1, 2, 3]);
/// # Ok(())
/// # }
/// ```
pub fn flow_from_iter<I>(items: I) -> impl Stream<Item = StreamItem<I::Item>>
where
    I: IntoIterator,
{
    stream::iter(items.into_iter().map(StreamItem::Value))
}
