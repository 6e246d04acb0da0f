// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The conflux-stream prelude: every extension trait, anonymously.

pub use crate::collect::CollectValuesExt as _;
pub use crate::filter::FilterItemsExt as _;
pub use crate::flat_map::FlatMapItemsExt as _;
pub use crate::fold::FoldItemsExt as _;
#[cfg(feature = "runtime-tokio")]
pub use crate::from_receiver::ReceiverFlowExt as _;
pub use crate::map_concurrent::MapConcurrentExt as _;
pub use crate::race_merge::RaceMergeExt as _;

pub use crate::conflux_stream::ConfluxStream;
pub use crate::from_iter::flow_from_iter;
pub use crate::map_concurrent::{FailureMode, MapConcurrentOptions};
