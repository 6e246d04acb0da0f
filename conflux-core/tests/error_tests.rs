// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::ConfluxError;
use std::error::Error;

#[derive(Debug, thiserror::Error)]
#[error("disk full")]
struct DiskFull;

#[test]
fn test_display_formats() {
    assert_eq!(
        ConfluxError::stream_error("stalled").to_string(),
        "stream processing error: stalled"
    );
    assert_eq!(
        ConfluxError::upstream_error("socket closed").to_string(),
        "upstream error: socket closed"
    );
    assert_eq!(
        ConfluxError::config_error("concurrency is zero").to_string(),
        "invalid configuration: concurrency is zero"
    );
    assert_eq!(
        ConfluxError::transform_error(3, DiskFull).to_string(),
        "transform failed for item 3: disk full"
    );
    assert_eq!(
        ConfluxError::sink_error(DiskFull).to_string(),
        "sink error: disk full"
    );
}

#[test]
fn test_transform_error_keeps_source_and_index() {
    let err = ConfluxError::transform_error(7, DiskFull);
    assert!(err.is_transform());
    assert!(!err.is_upstream());
    match &err {
        ConfluxError::Transform { index, .. } => assert_eq!(*index, 7),
        other => panic!("expected Transform, got {other:?}"),
    }
    assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("disk full"));
}

#[test]
fn test_sink_error_keeps_source() {
    let err = ConfluxError::sink_error(DiskFull);
    assert!(err.source().is_some());
}

#[test]
fn test_upstream_predicate() {
    assert!(ConfluxError::upstream_error("gone").is_upstream());
    assert!(!ConfluxError::stream_error("gone").is_upstream());
}
