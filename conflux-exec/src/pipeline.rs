// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pipeline-completion primitives.
//!
//! A conflux pipeline is an ordinary chain of flow combinators; these
//! functions couple such a chain to a future that resolves when the final
//! stage finishes and fails with the first error raised anywhere in the
//! chain, so downstream consumers observe termination instead of hanging.

use crate::logging::{debug, warn};
use conflux_core::{ConfluxError, IntoFlow, Result, StreamItem};
use futures::{pin_mut, Future, StreamExt};

/// Drives a composed flow to completion, discarding its values.
///
/// Resolves `Ok(())` when the flow is exhausted cleanly and returns the
/// first in-band error otherwise. Values emitted before a failure stay
/// consumed; there is no rollback.
///
/// # Examples
///
/// ```rust
/// use conflux_exec::run_pipeline;
/// use conflux_stream::prelude::*;
/// use std::convert::Infallible;
///
/// # async fn example() -> conflux_core::Result<()> {
/// let flow = flow_from_iter([1, 2, 3])
///     .map_concurrent(2, |n| async move { Ok::<_, Infallible>(n * 2) });
/// run_pipeline(flow).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline<I, T>(source: I) -> Result<()>
where
    I: IntoFlow<Item = T>,
{
    debug!("pipeline started");
    let flow = source.into_flow();
    pin_mut!(flow);
    while let Some(item) = flow.next().await {
        if let StreamItem::Error(err) = item {
            warn!("pipeline failed: {}", err);
            return Err(err);
        }
    }
    debug!("pipeline finished");
    Ok(())
}

/// Drives a composed flow into a write callback, coupling source, stages
/// and sink into one completion future.
///
/// Each value is awaited through `write` sequentially. The future fails
/// with the first error raised anywhere in the chain: in-band flow errors
/// are returned as-is, a callback failure is wrapped in
/// [`ConfluxError::Sink`].
pub async fn run_pipeline_into<I, T, F, Fut, E>(source: I, mut write: F) -> Result<()>
where
    I: IntoFlow<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    debug!("pipeline started");
    let flow = source.into_flow();
    pin_mut!(flow);
    while let Some(item) = flow.next().await {
        match item {
            StreamItem::Value(value) => {
                write(value).await.map_err(ConfluxError::sink_error)?;
            }
            StreamItem::Error(err) => {
                warn!("pipeline failed: {}", err);
                return Err(err);
            }
        }
    }
    debug!("pipeline finished");
    Ok(())
}
