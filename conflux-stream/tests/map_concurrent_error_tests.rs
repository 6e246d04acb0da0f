// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Failure propagation and cancellation tests for `map_concurrent`.

use conflux_core::{ConfluxError, StreamItem};
use conflux_stream::{
    flow_from_iter, FailureMode, MapConcurrentExt, MapConcurrentOptions,
};
use conflux_test_utils::{
    assert_stream_ended, test_channel_with_errors, unwrap_stream, InjectedError,
};
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_transform_failure_carries_item_index() -> anyhow::Result<()> {
    // Arrange: sequential stage, second invocation fails.
    let dispatched = Arc::new(AtomicUsize::new(0));
    let dispatched_in = Arc::clone(&dispatched);

    let mut flow = flow_from_iter([1u64, 2, 3, 4]).map_concurrent(1, move |n| {
        let dispatched = Arc::clone(&dispatched_in);
        async move {
            dispatched.fetch_add(1, Ordering::SeqCst);
            if n == 2 {
                Err(InjectedError::new("second item"))
            } else {
                Ok(n * 2)
            }
        }
    });

    // Act & Assert: the value before the failure is emitted, then the error.
    assert_eq!(unwrap_stream(&mut flow, 500).await.unwrap(), 2);
    match unwrap_stream(&mut flow, 500).await {
        StreamItem::Error(ConfluxError::Transform { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected transform error, got {other:?}"),
    }

    // The stage terminates and never dispatches the remaining items.
    assert_stream_ended(&mut flow, 500).await;
    assert_eq!(dispatched.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_failure_suppresses_later_values() -> anyhow::Result<()> {
    // Arrange: item 2 fails immediately while item 1 is still running, so
    // nothing has been emitted when the fault lands.
    let mut flow = flow_from_iter([1u64, 2, 3]).map_concurrent(2, |n| async move {
        if n == 2 {
            return Err(InjectedError::new("fast failure"));
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(n)
    });

    // Act & Assert: the error is the first and only emission.
    let item = unwrap_stream(&mut flow, 500).await;
    assert!(matches!(item, StreamItem::Error(ConfluxError::Transform { index: 1, .. })));
    assert_stream_ended(&mut flow, 500).await;
    Ok(())
}

#[tokio::test]
async fn test_upstream_error_propagates() -> anyhow::Result<()> {
    // Arrange
    let (tx, flow) = test_channel_with_errors::<u64>();
    let mut flow = flow.map_concurrent(2, |n| async move { Ok::<_, Infallible>(n + 1) });

    // Act & Assert: values before the error flow through.
    tx.send(StreamItem::Value(1))?;
    assert_eq!(unwrap_stream(&mut flow, 500).await.unwrap(), 2);

    tx.send(StreamItem::Error(ConfluxError::upstream_error("socket closed")))?;
    let item = unwrap_stream(&mut flow, 500).await;
    assert!(matches!(item, StreamItem::Error(ConfluxError::Upstream { .. })));
    assert_stream_ended(&mut flow, 500).await;
    Ok(())
}

#[tokio::test]
async fn test_abort_eagerly_cancels_in_flight_work() -> anyhow::Result<()> {
    // Arrange: item 1 would complete after 400ms; item 2 fails at once.
    // Under the default policy the straggler is dropped, not awaited.
    let completed = Arc::new(AtomicBool::new(false));
    let completed_in = Arc::clone(&completed);

    let mut flow = flow_from_iter([1u64, 2]).map_concurrent(2, move |n| {
        let completed = Arc::clone(&completed_in);
        async move {
            if n == 2 {
                return Err(InjectedError::new("eager abort"));
            }
            tokio::time::sleep(Duration::from_millis(400)).await;
            completed.store(true, Ordering::SeqCst);
            Ok(n)
        }
    });

    // Act: the error surfaces well before the straggler's deadline.
    let item = unwrap_stream(&mut flow, 200).await;
    assert!(item.is_error());
    assert_stream_ended(&mut flow, 200).await;

    // Assert: the cancelled transform never ran to completion.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!completed.load(Ordering::SeqCst));
    Ok(())
}

#[tokio::test]
async fn test_drain_in_flight_awaits_stragglers() -> anyhow::Result<()> {
    // Arrange: same shape, but the drain policy holds the error until the
    // in-flight transform has finished.
    let completed = Arc::new(AtomicBool::new(false));
    let completed_in = Arc::clone(&completed);

    let options = MapConcurrentOptions::new(2).failure_mode(FailureMode::DrainInFlight);
    let mut flow = flow_from_iter([1u64, 2]).map_concurrent_with(options, move |n| {
        let completed = Arc::clone(&completed_in);
        async move {
            if n == 2 {
                return Err(InjectedError::new("drain first"));
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
            completed.store(true, Ordering::SeqCst);
            Ok(n)
        }
    });

    // Act
    let item = unwrap_stream(&mut flow, 1000).await;

    // Assert: the straggler ran to completion, but its result is discarded
    // and the error is still the only emission.
    assert!(item.is_error());
    assert!(completed.load(Ordering::SeqCst));
    assert_stream_ended(&mut flow, 500).await;
    Ok(())
}

#[tokio::test]
#[should_panic(expected = "concurrency must be greater than zero")]
async fn test_zero_concurrency_panics_at_construction() {
    let _ = flow_from_iter([1u64]).map_concurrent(0, |n| async move { Ok::<_, Infallible>(n) });
}

#[tokio::test]
#[should_panic(expected = "watermark must be at least the concurrency limit")]
async fn test_watermark_below_concurrency_panics_at_construction() {
    let options = MapConcurrentOptions::new(4).watermark(2);
    let _ = flow_from_iter([1u64])
        .map_concurrent_with(options, |n| async move { Ok::<_, Infallible>(n) });
}
