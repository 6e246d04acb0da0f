// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded-concurrency mapping operator that preserves admission order.

use conflux_core::{ConfluxError, StreamItem};
use futures::stream::FuturesUnordered;
use futures::{Future, Stream, StreamExt};
use pin_project::pin_project;
use std::collections::BTreeMap;
use std::pin::Pin;
use std::task::{Context, Poll};

/// How a [`MapConcurrent`] stage treats transforms that are still running
/// when one of its transforms (or the upstream) has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Drop all in-flight transforms immediately. Dropping a future cancels
    /// it, so no result produced after the fault is observed anywhere.
    #[default]
    AbortEagerly,
    /// Let in-flight transforms run to completion, discard their results,
    /// then surface the error.
    DrainInFlight,
}

/// Configuration for [`MapConcurrentExt::map_concurrent_with`].
#[derive(Debug, Clone, Copy)]
pub struct MapConcurrentOptions {
    /// Maximum number of simultaneously in-flight transforms.
    pub concurrency: usize,
    /// Upper bound on `in_flight + buffered results`. Admission of new
    /// upstream items is suspended while the stage holds this many
    /// outstanding entries, bounding memory use when the consumer is slow.
    /// Defaults to `2 * concurrency`.
    pub watermark: Option<usize>,
    /// Treatment of in-flight work once a fault is observed.
    pub failure_mode: FailureMode,
}

impl MapConcurrentOptions {
    /// Options with the given concurrency limit and default watermark and
    /// failure mode.
    pub const fn new(concurrency: usize) -> Self {
        Self {
            concurrency,
            watermark: None,
            failure_mode: FailureMode::AbortEagerly,
        }
    }

    /// Sets the outstanding-entry watermark.
    #[must_use]
    pub const fn watermark(mut self, watermark: usize) -> Self {
        self.watermark = Some(watermark);
        self
    }

    /// Sets the failure mode.
    #[must_use]
    pub const fn failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }
}

/// A transform future tagged with the admission index of its item.
#[pin_project]
struct IndexedTransform<Fut> {
    index: u64,
    #[pin]
    fut: Fut,
}

impl<Fut: Future> Future for IndexedTransform<Fut> {
    type Output = (u64, Fut::Output);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.fut.poll(cx) {
            Poll::Ready(output) => Poll::Ready((*this.index, output)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Stream returned by [`MapConcurrentExt::map_concurrent`].
///
/// Runs up to `concurrency` transforms at once while emitting outputs in
/// the exact order their inputs were admitted, independent of completion
/// order. The state machine owns all of its bookkeeping:
///
/// - `next_index` assigns each admitted item a strictly increasing index;
/// - `in_flight` is the slot pool, a set of index-tagged transform futures;
/// - `ready` is the reorder buffer of completed-but-unemitted results;
/// - `next_to_emit` is the cursor below which everything has been emitted.
///
/// Admission happens only inside `poll_next`, so an unpolled (backpressured)
/// stage pulls nothing from upstream, and the reorder buffer is additionally
/// capped by the watermark.
#[pin_project]
pub struct MapConcurrent<S, F, Fut, U>
where
    Fut: Future,
{
    #[pin]
    upstream: S,
    transform: F,
    concurrency: usize,
    watermark: usize,
    failure_mode: FailureMode,
    in_flight: FuturesUnordered<IndexedTransform<Fut>>,
    ready: BTreeMap<u64, U>,
    next_index: u64,
    next_to_emit: u64,
    upstream_done: bool,
    fault: Option<ConfluxError>,
    done: bool,
}

impl<S, F, Fut, U> MapConcurrent<S, F, Fut, U>
where
    Fut: Future,
{
    pub(crate) fn new(upstream: S, transform: F, options: MapConcurrentOptions) -> Self {
        assert!(
            options.concurrency > 0,
            "map_concurrent: concurrency must be greater than zero"
        );
        let watermark = options.watermark.unwrap_or(options.concurrency * 2);
        assert!(
            watermark >= options.concurrency,
            "map_concurrent: watermark must be at least the concurrency limit"
        );
        Self {
            upstream,
            transform,
            concurrency: options.concurrency,
            watermark,
            failure_mode: options.failure_mode,
            in_flight: FuturesUnordered::new(),
            ready: BTreeMap::new(),
            next_index: 0,
            next_to_emit: 0,
            upstream_done: false,
            fault: None,
            done: false,
        }
    }
}

impl<S, T, F, Fut, U, E> Stream for MapConcurrent<S, F, Fut, U>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = std::result::Result<U, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if *this.done {
                return Poll::Ready(None);
            }

            // A recorded fault supersedes everything else. In drain mode the
            // slot pool still holds work; run it down (discarding results)
            // before the error is surfaced. In abort mode the pool was
            // cleared when the fault was recorded.
            if let Some(err) = this.fault.take() {
                while !this.in_flight.is_empty() {
                    match this.in_flight.poll_next_unpin(cx) {
                        Poll::Ready(Some(_)) => {}
                        Poll::Ready(None) => break,
                        Poll::Pending => {
                            *this.fault = Some(err);
                            return Poll::Pending;
                        }
                    }
                }
                *this.done = true;
                return Poll::Ready(Some(StreamItem::Error(err)));
            }

            // Admission: pull upstream while a slot is free and the
            // watermark leaves headroom. Dispatch is immediate, so the
            // backlog of admitted-but-undispatched items is always empty.
            while !*this.upstream_done
                && this.in_flight.len() < *this.concurrency
                && this.in_flight.len() + this.ready.len() < *this.watermark
            {
                match this.upstream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(item))) => {
                        let index = *this.next_index;
                        *this.next_index += 1;
                        this.in_flight.push(IndexedTransform {
                            index,
                            fut: (this.transform)(item),
                        });
                    }
                    Poll::Ready(Some(StreamItem::Error(err))) => {
                        *this.upstream_done = true;
                        this.ready.clear();
                        if *this.failure_mode == FailureMode::AbortEagerly {
                            this.in_flight.clear();
                        }
                        *this.fault = Some(err);
                    }
                    Poll::Ready(None) => *this.upstream_done = true,
                    Poll::Pending => break,
                }
            }
            if this.fault.is_some() {
                continue;
            }

            // Collect completed transforms into the reorder buffer. A
            // transform failure becomes the stage's terminal fault.
            let mut progressed = false;
            loop {
                match this.in_flight.poll_next_unpin(cx) {
                    Poll::Ready(Some((index, Ok(value)))) => {
                        this.ready.insert(index, value);
                        progressed = true;
                    }
                    Poll::Ready(Some((index, Err(err)))) => {
                        *this.upstream_done = true;
                        this.ready.clear();
                        if *this.failure_mode == FailureMode::AbortEagerly {
                            this.in_flight.clear();
                        }
                        *this.fault = Some(ConfluxError::transform_error(index, err));
                        break;
                    }
                    Poll::Ready(None) | Poll::Pending => break,
                }
            }
            if this.fault.is_some() {
                continue;
            }

            // Flush: emit the cursor's result if it has completed. Lower
            // indexes are either emitted or still in flight, so the output
            // sequence never has a gap.
            if let Some(value) = this.ready.remove(this.next_to_emit) {
                *this.next_to_emit += 1;
                return Poll::Ready(Some(StreamItem::Value(value)));
            }

            // Completion: only when upstream is exhausted, no slot is
            // occupied and the reorder buffer has drained. Checked after the
            // flush so the last completing transform is emitted first.
            if *this.upstream_done && this.in_flight.is_empty() && this.ready.is_empty() {
                *this.done = true;
                return Poll::Ready(None);
            }

            // A completed transform may have freed a slot or watermark
            // headroom; go around again. Otherwise every waker is
            // registered.
            if !progressed {
                return Poll::Pending;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let outstanding = self.in_flight.len() + self.ready.len();
        let (lower, upper) = self.upstream.size_hint();
        (
            lower.saturating_add(outstanding),
            upper.and_then(|upper| upper.checked_add(outstanding)),
        )
    }
}

/// Extension trait providing the `map_concurrent` operator for flows.
pub trait MapConcurrentExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Maps each item through an asynchronous, fallible transform, running
    /// up to `concurrency` transforms at once while preserving admission
    /// order in the output.
    ///
    /// # Behavior
    ///
    /// - Outputs are emitted in the exact order their inputs arrived,
    ///   regardless of per-item completion latency.
    /// - At most `concurrency` transforms are in flight at any instant.
    /// - A failing transform is fatal to the stage: the error is emitted as
    ///   a [`StreamItem::Error`] and nothing further is admitted, dispatched
    ///   or emitted. In-flight work is cancelled by default; see
    ///   [`FailureMode`].
    /// - Upstream errors short-circuit the same way, propagated unchanged.
    /// - `concurrency = 1` degenerates to sequential ordered execution with
    ///   no overlap between transforms.
    ///
    /// # Panics
    ///
    /// Panics if `concurrency` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conflux_stream::{flow_from_iter, CollectValuesExt, MapConcurrentExt};
    /// use std::convert::Infallible;
    ///
    /// # async fn example() -> conflux_core::Result<()> {
    /// let doubled = flow_from_iter([3, 1, 2])
    ///     .map_concurrent(2, |x| async move { Ok::<_, Infallible>(x * 2) })
    ///     .collect_values()
    ///     .await?;
    /// assert_eq!(doubled, vec![6, 2, 4]);
    /// # Ok(())
    /// # }
    /// ```
    fn map_concurrent<U, E, F, Fut>(
        self,
        concurrency: usize,
        transform: F,
    ) -> MapConcurrent<Self, F, Fut, U>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = std::result::Result<U, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.map_concurrent_with(MapConcurrentOptions::new(concurrency), transform)
    }

    /// As [`map_concurrent`](Self::map_concurrent), with an explicit
    /// watermark and failure mode.
    ///
    /// # Panics
    ///
    /// Panics if `options.concurrency` is zero or the watermark is below the
    /// concurrency limit.
    fn map_concurrent_with<U, E, F, Fut>(
        self,
        options: MapConcurrentOptions,
        transform: F,
    ) -> MapConcurrent<Self, F, Fut, U>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = std::result::Result<U, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        MapConcurrent::new(self, transform, options)
    }
}

impl<S, T> MapConcurrentExt<T> for S where S: Stream<Item = StreamItem<T>> {}
