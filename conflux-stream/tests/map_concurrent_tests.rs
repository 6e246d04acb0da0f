// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ordering, concurrency-bound and completion tests for `map_concurrent`.

use conflux_stream::{flow_from_iter, CollectValuesExt, MapConcurrentExt, MapConcurrentOptions};
use conflux_test_utils::{
    assert_no_element_emitted, assert_stream_ended, staggered, test_channel, unwrap_stream,
};
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_output_order_matches_admission_order() -> anyhow::Result<()> {
    // Arrange: delays proportional to the value, so 3 finishes last and 1
    // finishes first even though 3 was admitted first.
    let flow = flow_from_iter([3u64, 1, 2]).map_concurrent(2, |n| staggered(n * 2, n * 30));

    // Act
    let output = flow.collect_values().await?;

    // Assert: admission order, not completion order.
    assert_eq!(output, vec![6, 2, 4]);
    Ok(())
}

#[tokio::test]
async fn test_concurrency_bound_is_never_exceeded() -> anyhow::Result<()> {
    // Arrange: count simultaneously running transforms and track the high
    // water mark.
    let active = Arc::new(AtomicUsize::new(0));
    let high_water = Arc::new(AtomicUsize::new(0));
    let active_in = Arc::clone(&active);
    let high_water_in = Arc::clone(&high_water);

    let flow = flow_from_iter(0..20u64).map_concurrent(3, move |n| {
        let active = Arc::clone(&active_in);
        let high_water = Arc::clone(&high_water_in);
        async move {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            high_water.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            active.fetch_sub(1, Ordering::SeqCst);
            Ok::<_, Infallible>(n)
        }
    });

    // Act
    let output = flow.collect_values().await?;

    // Assert
    assert_eq!(output, (0..20).collect::<Vec<_>>());
    assert!(high_water.load(Ordering::SeqCst) <= 3);
    assert_eq!(active.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_concurrency_one_is_sequential() -> anyhow::Result<()> {
    // Arrange
    let active = Arc::new(AtomicUsize::new(0));
    let high_water = Arc::new(AtomicUsize::new(0));
    let active_in = Arc::clone(&active);
    let high_water_in = Arc::clone(&high_water);

    let flow = flow_from_iter([3u64, 1, 2]).map_concurrent(1, move |n| {
        let active = Arc::clone(&active_in);
        let high_water = Arc::clone(&high_water_in);
        async move {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            high_water.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(n * 10)).await;
            active.fetch_sub(1, Ordering::SeqCst);
            Ok::<_, Infallible>(n * 2)
        }
    });

    // Act
    let output = flow.collect_values().await?;

    // Assert: input order and no overlap between transforms.
    assert_eq!(output, vec![6, 2, 4]);
    assert_eq!(high_water.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_concurrency_above_input_length() -> anyhow::Result<()> {
    // Arrange: every transform starts immediately; reordering is purely a
    // function of completion latency.
    let flow = flow_from_iter([5u64, 4, 3, 2, 1]).map_concurrent(16, |n| staggered(n, n * 20));

    // Act
    let output = flow.collect_values().await?;

    // Assert
    assert_eq!(output, vec![5, 4, 3, 2, 1]);
    Ok(())
}

#[tokio::test]
async fn test_empty_input_completes_immediately() -> anyhow::Result<()> {
    // Arrange
    let flow = flow_from_iter(Vec::<u64>::new())
        .map_concurrent(4, |n| async move { Ok::<_, Infallible>(n) });

    // Act & Assert
    assert!(flow.collect_values().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_completion_requires_upstream_exhaustion() -> anyhow::Result<()> {
    // Arrange
    let (tx, flow) = test_channel::<u64>();
    let mut flow = flow.map_concurrent(2, |n| async move { Ok::<_, Infallible>(n + 1) });

    // Act & Assert: items flow through while the channel is open.
    tx.send(1)?;
    assert_eq!(unwrap_stream(&mut flow, 500).await.unwrap(), 2);
    tx.send(2)?;
    assert_eq!(unwrap_stream(&mut flow, 500).await.unwrap(), 3);

    // All admitted items emitted, but upstream is still open: no end yet.
    assert_no_element_emitted(&mut flow, 50).await;

    // Closing the channel ends the stage.
    drop(tx);
    assert_stream_ended(&mut flow, 500).await;
    Ok(())
}

#[tokio::test]
async fn test_watermark_suspends_admission() -> anyhow::Result<()> {
    // Arrange: the first transform never completes, so its result blocks
    // the emission cursor while later completions pile up in the reorder
    // buffer until the watermark stops admission.
    let admitted = Arc::new(AtomicUsize::new(0));
    let admitted_in = Arc::clone(&admitted);

    let (tx, flow) = test_channel::<u64>();
    for n in 0..10 {
        tx.send(n)?;
    }

    let options = MapConcurrentOptions::new(2).watermark(2);
    let mut flow = flow.map_concurrent_with(options, move |n| {
        let admitted = Arc::clone(&admitted_in);
        async move {
            admitted.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                futures::future::pending::<()>().await;
            }
            Ok::<_, Infallible>(n)
        }
    });

    // Act: drive the stage; the head never completes so nothing emits.
    assert_no_element_emitted(&mut flow, 100).await;

    // Assert: one slot is stuck, one completion is buffered, admission has
    // stopped at the watermark.
    assert_eq!(admitted.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_larger_watermark_admits_past_free_slots() -> anyhow::Result<()> {
    // Arrange: same stuck head, but a watermark of 4 lets the free slot
    // keep dispatching until in-flight plus buffered reaches 4.
    let admitted = Arc::new(AtomicUsize::new(0));
    let admitted_in = Arc::clone(&admitted);

    let (tx, flow) = test_channel::<u64>();
    for n in 0..10 {
        tx.send(n)?;
    }

    let options = MapConcurrentOptions::new(2).watermark(4);
    let mut flow = flow.map_concurrent_with(options, move |n| {
        let admitted = Arc::clone(&admitted_in);
        async move {
            admitted.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                futures::future::pending::<()>().await;
            }
            Ok::<_, Infallible>(n)
        }
    });

    // Act
    assert_no_element_emitted(&mut flow, 100).await;

    // Assert
    assert_eq!(admitted.load(Ordering::SeqCst), 4);
    Ok(())
}
