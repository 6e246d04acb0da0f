// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every conflux crate: the in-band [`StreamItem`]
//! value-or-error channel, the [`ConfluxError`] taxonomy, and the
//! [`IntoFlow`] conversion trait.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod error;
pub mod into_flow;
pub mod stream_item;

pub use self::error::{ConfluxError, Result};
pub use self::into_flow::IntoFlow;
pub use self::stream_item::StreamItem;
