// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for conflux stream pipelines.
//!
//! All failure modes a pipeline can surface are collected in the root
//! [`ConfluxError`] enum. Errors travel through flows in-band as
//! [`StreamItem::Error`](crate::StreamItem::Error) items and terminate the
//! stage that produced them; nothing is swallowed.

/// Root error type for all conflux operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluxError {
    /// A user-supplied transform failed.
    ///
    /// Fatal to the whole mapping stage: no further items are admitted or
    /// dispatched after this error is observed. `index` is the admission
    /// index of the item whose transform failed.
    #[error("transform failed for item {index}: {source}")]
    Transform {
        /// Admission index of the failing item
        index: u64,
        /// The error returned by the transform
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The upstream source signaled an error instead of clean exhaustion.
    #[error("upstream error: {context}")]
    Upstream {
        /// Description of the upstream failure
        context: String,
    },

    /// A sink write or completion callback failed.
    #[error("sink error: {source}")]
    Sink {
        /// The error returned by the sink callback
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An operator was constructed with an invalid parameter.
    ///
    /// Configuration problems are rejected eagerly at construction, never
    /// deferred to first use.
    #[error("invalid configuration: {context}")]
    Config {
        /// Description of the rejected parameter
        context: String,
    },

    /// General stream-processing error that fits no other category.
    #[error("stream processing error: {context}")]
    Stream {
        /// Description of what went wrong
        context: String,
    },
}

impl ConfluxError {
    /// Create a general stream-processing error with the given context.
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::Stream {
            context: context.into(),
        }
    }

    /// Create an upstream error with the given context.
    pub fn upstream_error(context: impl Into<String>) -> Self {
        Self::Upstream {
            context: context.into(),
        }
    }

    /// Create a configuration error with the given context.
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::Config {
            context: context.into(),
        }
    }

    /// Wrap a transform failure together with the admission index of the
    /// item that triggered it.
    pub fn transform_error(
        index: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transform {
            index,
            source: Box::new(source),
        }
    }

    /// Wrap an error returned by a sink callback.
    pub fn sink_error(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Sink {
            source: Box::new(source),
        }
    }

    /// Returns `true` if this error originated in a user transform.
    pub const fn is_transform(&self) -> bool {
        matches!(self, Self::Transform { .. })
    }

    /// Returns `true` if this error originated upstream.
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ConfluxError>;
