// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fan-in merger that interleaves sources by first-completion order.

use conflux_core::StreamItem;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

type BoxedFlow<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>;

/// Merges several flows into one, forwarding whichever source produces its
/// next item first.
///
/// Output order is not input order: it reflects completion races between
/// the sources. Items from the same source are never reordered relative to
/// each other. The merged flow ends when every source is exhausted; an
/// error from any source is forwarded and terminates the merge immediately.
///
/// This is a pure race. No round-robin fairness is imposed, but each poll
/// starts at a random offset so that one permanently ready source does not
/// systematically shadow the others.
pub struct RaceMerge<T> {
    sources: Vec<Option<BoxedFlow<T>>>,
    active: usize,
    done: bool,
}

impl<T> RaceMerge<T> {
    /// Constructs a merge over the given sources.
    #[must_use]
    pub fn new<S>(sources: Vec<S>) -> Self
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        let active = sources.len();
        let sources = sources
            .into_iter()
            .map(|source| Some(Box::pin(source) as BoxedFlow<T>))
            .collect();

        Self {
            sources,
            active,
            done: false,
        }
    }

    /// Adds one more source to the race.
    ///
    /// Only valid before the merge has terminated.
    pub fn push<S>(&mut self, source: S)
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        debug_assert!(!self.done, "pushed a source into a finished merge");
        self.sources.push(Some(Box::pin(source)));
        self.active += 1;
    }
}

impl<T> Stream for RaceMerge<T> {
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.done {
            return Poll::Ready(None);
        }
        if this.active == 0 {
            this.done = true;
            return Poll::Ready(None);
        }

        // Poll every still-active source once, starting at a random offset.
        // The first ready item wins the race; its source is re-polled on the
        // next call. Exhausted sources leave the race set.
        let len = this.sources.len();
        let start = fastrand::usize(..len);
        for step in 0..len {
            let i = (start + step) % len;
            let polled = match this.sources[i].as_mut() {
                Some(source) => source.as_mut().poll_next(cx),
                None => continue,
            };
            match polled {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    return Poll::Ready(Some(StreamItem::Value(value)));
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    this.done = true;
                    return Poll::Ready(Some(StreamItem::Error(err)));
                }
                Poll::Ready(None) => {
                    this.sources[i] = None;
                    this.active -= 1;
                }
                Poll::Pending => {}
            }
        }

        if this.active == 0 {
            this.done = true;
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}

/// Extension trait for racing a vector of flows into one.
pub trait RaceMergeExt {
    /// The value type carried by the merged flow.
    type Item;

    /// Merges multiple flows, forwarding items in first-completion order.
    fn race_merge(self) -> RaceMerge<Self::Item>;
}

impl<T, S> RaceMergeExt for Vec<S>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
{
    type Item = T;

    fn race_merge(self) -> RaceMerge<Self::Item> {
        RaceMerge::new(self)
    }
}
