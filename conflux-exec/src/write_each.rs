// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::warn;
use async_trait::async_trait;
use conflux_core::{ConfluxError, Result, StreamItem};
use futures::{Future, Stream, StreamExt};

/// Extension trait that consumes a flow through an async write callback.
///
/// This is the sink end of a pipeline: each value is handed to the
/// callback sequentially, and the next value is not pulled until the
/// callback's future resolves, so a slow sink backpressures the whole
/// chain.
#[async_trait]
pub trait WriteEachExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Consumes the flow, awaiting `write` for each value in order.
    ///
    /// Returns `Ok(())` once the flow is exhausted cleanly. The first error
    /// aborts consumption and is returned: an in-band flow error is
    /// returned as-is, a callback failure is wrapped in
    /// [`ConfluxError::Sink`]. Values already written stay written; there
    /// is no rollback.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conflux_exec::WriteEachExt;
    /// use conflux_stream::flow_from_iter;
    /// use std::convert::Infallible;
    ///
    /// # async fn example() -> conflux_core::Result<()> {
    /// let mut seen = Vec::new();
    /// flow_from_iter([1, 2, 3])
    ///     .write_each(|n| {
    ///         seen.push(n);
    ///         async { Ok::<_, Infallible>(()) }
    ///     })
    ///     .await?;
    /// assert_eq!(seen, vec![1, 2, 3]);
    /// # Ok(())
    /// # }
    /// ```
    async fn write_each<F, Fut, E>(self, write: F) -> Result<()>
    where
        F: FnMut(T) -> Fut + Send,
        Fut: Future<Output = std::result::Result<(), E>> + Send,
        E: std::error::Error + Send + Sync + 'static,
        T: Send + 'static;

    /// As [`write_each`](Self::write_each), additionally awaiting a
    /// completion callback after clean exhaustion.
    ///
    /// The completion callback does not run if consumption aborted on an
    /// error; its own failure is wrapped in [`ConfluxError::Sink`].
    async fn write_each_then<F, Fut, E, Fin, FinFut>(self, write: F, finalize: Fin) -> Result<()>
    where
        F: FnMut(T) -> Fut + Send,
        Fut: Future<Output = std::result::Result<(), E>> + Send,
        Fin: FnOnce() -> FinFut + Send,
        FinFut: Future<Output = std::result::Result<(), E>> + Send,
        E: std::error::Error + Send + Sync + 'static,
        T: Send + 'static;
}

#[async_trait]
impl<S, T> WriteEachExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + Unpin,
{
    async fn write_each<F, Fut, E>(mut self, mut write: F) -> Result<()>
    where
        F: FnMut(T) -> Fut + Send,
        Fut: Future<Output = std::result::Result<(), E>> + Send,
        E: std::error::Error + Send + Sync + 'static,
        T: Send + 'static,
    {
        while let Some(item) = self.next().await {
            match item {
                StreamItem::Value(value) => {
                    write(value).await.map_err(ConfluxError::sink_error)?;
                }
                StreamItem::Error(err) => {
                    warn!("flow terminated by error: {}", err);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    async fn write_each_then<F, Fut, E, Fin, FinFut>(self, write: F, finalize: Fin) -> Result<()>
    where
        F: FnMut(T) -> Fut + Send,
        Fut: Future<Output = std::result::Result<(), E>> + Send,
        Fin: FnOnce() -> FinFut + Send,
        FinFut: Future<Output = std::result::Result<(), E>> + Send,
        E: std::error::Error + Send + Sync + 'static,
        T: Send + 'static,
    {
        self.write_each(write).await?;
        finalize().await.map_err(ConfluxError::sink_error)
    }
}
