// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::collect::CollectValuesExt;
use crate::filter::FilterItemsExt;
use crate::flat_map::FlatMapItemsExt;
use crate::fold::{FoldItems, FoldItemsExt};
use crate::map_concurrent::{MapConcurrent, MapConcurrentExt, MapConcurrentOptions};
use crate::race_merge::RaceMerge;
use conflux_core::{Result, StreamItem};
use futures::{Future, Stream};
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A concrete wrapper that provides all conflux operators as inherent
/// methods, so stages chain without importing each extension trait.
///
/// The wrapper is pure plumbing: it owns no state of its own and simply
/// forwards `poll_next` to the wrapped stream.
///
/// # Examples
///
/// ```rust
/// use conflux_stream::ConfluxStream;
/// use std::convert::Infallible;
///
/// # async fn example() -> conflux_core::Result<()> {
/// let output = ConfluxStream::from_iter([1, 2, 3, 4])
///     .filter_items(|&n| n % 2 == 0)
///     .map_concurrent(2, |n| async move { Ok::<_, Infallible>(n * 10) })
///     .collect_values()
///     .await?;
/// assert_eq!(output, vec![20, 40]);
/// # Ok(())
/// # }
/// ```
#[pin_project]
pub struct ConfluxStream<S> {
    #[pin]
    inner: S,
}

impl<S> ConfluxStream<S> {
    /// Wraps a stream.
    pub const fn new(stream: S) -> Self {
        Self { inner: stream }
    }

    /// Wraps an existing stream; alias for [`ConfluxStream::new`].
    pub fn from_stream(stream: S) -> Self {
        Self::new(stream)
    }

    /// Unwraps to the inner stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl ConfluxStream<()> {
    /// Creates a flow from a finite collection of values.
    pub fn from_iter<I>(items: I) -> ConfluxStream<impl Stream<Item = StreamItem<I::Item>>>
    where
        I: IntoIterator,
    {
        ConfluxStream::new(crate::from_iter::flow_from_iter(items))
    }
}

impl<S> Stream for ConfluxStream<S>
where
    S: Stream,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S, T> ConfluxStream<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    /// See [`MapConcurrentExt::map_concurrent`].
    pub fn map_concurrent<U, E, F, Fut>(
        self,
        concurrency: usize,
        transform: F,
    ) -> ConfluxStream<MapConcurrent<S, F, Fut, U>>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = std::result::Result<U, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfluxStream::new(self.inner.map_concurrent(concurrency, transform))
    }

    /// See [`MapConcurrentExt::map_concurrent_with`].
    pub fn map_concurrent_with<U, E, F, Fut>(
        self,
        options: MapConcurrentOptions,
        transform: F,
    ) -> ConfluxStream<MapConcurrent<S, F, Fut, U>>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = std::result::Result<U, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfluxStream::new(self.inner.map_concurrent_with(options, transform))
    }

    /// See [`FilterItemsExt::filter_items`].
    pub fn filter_items<P>(self, predicate: P) -> ConfluxStream<impl Stream<Item = StreamItem<T>>>
    where
        P: FnMut(&T) -> bool,
    {
        ConfluxStream::new(self.inner.filter_items(predicate))
    }

    /// See [`FlatMapItemsExt::flat_map_items`].
    pub fn flat_map_items<U, I, F>(self, f: F) -> ConfluxStream<impl Stream<Item = StreamItem<U>>>
    where
        F: FnMut(T) -> I,
        I: IntoIterator<Item = U>,
    {
        ConfluxStream::new(self.inner.flat_map_items(f))
    }

    /// See [`FoldItemsExt::fold_items`].
    pub fn fold_items<Acc, F>(self, seed: Acc, fold: F) -> ConfluxStream<FoldItems<S, F, Acc>>
    where
        F: FnMut(Acc, T) -> Acc,
    {
        ConfluxStream::new(self.inner.fold_items(seed, fold))
    }

    /// Races this flow against another, forwarding items in
    /// first-completion order.
    pub fn race_merge_with<Other>(self, other: Other) -> ConfluxStream<RaceMerge<T>>
    where
        S: Send + 'static,
        Other: Stream<Item = StreamItem<T>> + Send + 'static,
        T: 'static,
    {
        let mut merge = RaceMerge::new(vec![self.inner]);
        merge.push(other);
        ConfluxStream::new(merge)
    }

    /// See [`CollectValuesExt::collect_values`].
    pub async fn collect_values(self) -> Result<Vec<T>>
    where
        S: Send + Unpin,
        T: Send,
    {
        self.inner.collect_values().await
    }
}
