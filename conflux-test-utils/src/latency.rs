// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Latency and failure fixtures for completion-order tests.

use std::convert::Infallible;
use std::time::Duration;
use tokio::time::sleep;

/// Error type for injecting transform and sink failures in tests.
#[derive(Debug, thiserror::Error)]
#[error("injected failure: {message}")]
pub struct InjectedError {
    /// What was supposed to have gone wrong
    pub message: String,
}

impl InjectedError {
    /// Creates an injected error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Resolves to `Ok(value)` after sleeping `delay_ms`.
///
/// Useful as a transform whose completion order differs from its admission
/// order: pass each item a delay inversely related to its position and the
/// later items finish first.
pub async fn staggered<T>(value: T, delay_ms: u64) -> Result<T, Infallible> {
    sleep(Duration::from_millis(delay_ms)).await;
    Ok(value)
}
