// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ordered concurrent stream plumbing.
//!
//! conflux turns a sequential flow of items into a processed flow while
//! keeping the one guarantee that is hard to keep under concurrency:
//! **output order equals input order**, no matter which per-item transforms
//! finish first.
//!
//! - [`MapConcurrentExt::map_concurrent`](conflux_stream::MapConcurrentExt::map_concurrent)
//!   runs up to N async transforms at once and reorders completions back
//!   into admission order.
//! - [`RaceMergeExt::race_merge`](conflux_stream::RaceMergeExt::race_merge)
//!   interleaves several flows by first-completion order, preserving each
//!   source's internal order.
//! - Pass-through operators (`filter_items`, `flat_map_items`,
//!   `fold_items`), source constructors (`flow_from_iter`,
//!   `into_flow_stream`) and sink adapters (`write_each`, `run_pipeline`)
//!   complete the chain.
//!
//! Errors travel in-band as [`StreamItem::Error`] items: a failing
//! transform or source terminates its stage, propagates through every
//! downstream operator and surfaces from the pipeline-completion future.
//!
//! # Example
//!
//! ```rust
//! use conflux_rx::prelude::*;
//! use std::convert::Infallible;
//!
//! # async fn example() -> conflux_core::Result<()> {
//! let output = flow_from_iter([3, 1, 2])
//!     .map_concurrent(2, |n| async move { Ok::<_, Infallible>(n * 2) })
//!     .collect_values()
//!     .await?;
//! // Admission order, not completion order.
//! assert_eq!(output, vec![6, 2, 4]);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub use conflux_core::{ConfluxError, IntoFlow, Result, StreamItem};
pub use conflux_exec::{run_pipeline, run_pipeline_into, WriteEachExt};
pub use conflux_stream::{
    flow_from_iter, ConfluxStream, FailureMode, MapConcurrent, MapConcurrentOptions, RaceMerge,
};

/// The conflux prelude.
pub mod prelude {
    pub use conflux_core::{ConfluxError, StreamItem};
    pub use conflux_exec::WriteEachExt as _;
    pub use conflux_exec::{run_pipeline, run_pipeline_into};
    pub use conflux_stream::prelude::*;
}
