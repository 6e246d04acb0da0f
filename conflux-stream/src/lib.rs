// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream combinators for conflux pipelines.
//!
//! The centerpiece is [`MapConcurrentExt::map_concurrent`], a
//! bounded-concurrency mapper that emits outputs in admission order no
//! matter which transforms finish first, and [`RaceMergeExt::race_merge`],
//! a fan-in merger that interleaves sources by first-completion order.
//! Around them sit the sequential pass-through operators
//! ([`FilterItemsExt`], [`FlatMapItemsExt`], [`FoldItemsExt`]), source
//! constructors ([`flow_from_iter`], [`ReceiverFlowExt`]) and the
//! [`ConfluxStream`] chaining wrapper.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod collect;
pub mod conflux_stream;
pub mod filter;
pub mod flat_map;
pub mod fold;
pub mod from_iter;
#[cfg(feature = "runtime-tokio")]
pub mod from_receiver;
pub mod map_concurrent;
pub mod prelude;
pub mod race_merge;

pub use self::collect::CollectValuesExt;
pub use self::conflux_stream::ConfluxStream;
pub use self::filter::FilterItemsExt;
pub use self::flat_map::FlatMapItemsExt;
pub use self::fold::{FoldItems, FoldItemsExt};
pub use self::from_iter::flow_from_iter;
#[cfg(feature = "runtime-tokio")]
pub use self::from_receiver::ReceiverFlowExt;
pub use self::map_concurrent::{
    FailureMode, MapConcurrent, MapConcurrentExt, MapConcurrentOptions,
};
pub use self::race_merge::{RaceMerge, RaceMergeExt};
