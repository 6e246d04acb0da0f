// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::StreamItem;
use futures::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`FoldItemsExt::fold_items`].
///
/// Accumulates every upstream value and emits the final accumulator once,
/// when upstream finishes cleanly. An upstream error is forwarded instead
/// and the accumulator is discarded.
#[pin_project]
pub struct FoldItems<S, F, Acc> {
    #[pin]
    upstream: S,
    fold: F,
    acc: Option<Acc>,
    done: bool,
}

impl<S, T, F, Acc> Stream for FoldItems<S, F, Acc>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(Acc, T) -> Acc,
{
    type Item = StreamItem<Acc>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        loop {
            match this.upstream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    if let Some(acc) = this.acc.take() {
                        *this.acc = Some((this.fold)(acc, value));
                    }
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    *this.done = true;
                    return Poll::Ready(Some(StreamItem::Error(err)));
                }
                Poll::Ready(None) => {
                    *this.done = true;
                    return match this.acc.take() {
                        Some(acc) => Poll::Ready(Some(StreamItem::Value(acc))),
                        None => Poll::Ready(None),
                    };
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Extension trait providing the `fold_items` operator for flows.
pub trait FoldItemsExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Folds every value into a single accumulator, emitted once when
    /// upstream ends.
    ///
    /// Nothing is emitted until upstream finishes: the accumulator is the
    /// flow's only output. If upstream signals an error, the error is
    /// forwarded and the partial accumulator is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conflux_stream::{flow_from_iter, CollectValuesExt, FoldItemsExt};
    ///
    /// # async fn example() -> conflux_core::Result<()> {
    /// let sums = flow_from_iter([1, 2, 3])
    ///     .fold_items(0, |acc, n| acc + n)
    ///     .collect_values()
    ///     .await?;
    /// assert_eq!(sums, vec![6]);
    /// # Ok(())
    /// # }
    /// ```
    fn fold_items<Acc, F>(self, seed: Acc, fold: F) -> FoldItems<Self, F, Acc>
    where
        F: FnMut(Acc, T) -> Acc,
    {
        FoldItems {
            upstream: self,
            fold,
            acc: Some(seed),
            done: false,
        }
    }
}

impl<S, T> FoldItemsExt<T> for S where S: Stream<Item = StreamItem<T>> {}
