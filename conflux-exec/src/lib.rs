// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sink adapters and pipeline-completion primitives for conflux flows.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod logging;
pub mod pipeline;
pub mod write_each;

pub use self::pipeline::{run_pipeline, run_pipeline_into};
pub use self::write_each::WriteEachExt;
