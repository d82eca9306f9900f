use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{sweeper, tagged};
use crate::config::Tagged;
use crate::heartbeat::Heartbeat;
use crate::support::Harness;

const SEC: Duration = Duration::from_secs(1);

async fn settle() {
    tokio::time::sleep(Duration::from_millis(30)).await;
}

#[tokio::test]
async fn test_sweeper_sweeps_on_each_beat() {
    let h = Harness::new();
    let heartbeat = Heartbeat::new();
    let token = CancellationToken::new();
    let counters = Arc::new(sweeper::Counters::new());
    let active = Arc::new(AtomicI64::new(0));

    let task = tokio::spawn(sweeper::run(
        h.registry.clone(),
        heartbeat.subscribe(),
        token.clone(),
        counters.clone(),
        active.clone(),
    ));

    h.registry.add(1, SEC, None).unwrap();
    h.registry.add(2, 3 * SEC, None).unwrap();

    h.clock.set(SEC);
    assert_eq!(heartbeat.beat(), 1);
    settle().await;
    assert_eq!(h.registry.count(), 1);
    assert_eq!(active.load(Ordering::Relaxed), 1);

    h.clock.set(3 * SEC);
    heartbeat.beat();
    settle().await;
    assert_eq!(h.registry.count(), 0);

    let stats = counters.reset();
    assert_eq!(stats.sweeps, 2);
    assert_eq!(stats.expired, 2);

    token.cancel();
    task.await.unwrap();
    assert_eq!(heartbeat.subscribers(), 0, "sweeper unsubscribed");
    assert_eq!(active.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_sweeper_exits_when_registry_destroyed() {
    let h = Harness::new();
    let heartbeat = Heartbeat::new();
    let task = tokio::spawn(sweeper::run(
        h.registry.clone(),
        heartbeat.subscribe(),
        CancellationToken::new(),
        Arc::new(sweeper::Counters::new()),
        Arc::new(AtomicI64::new(0)),
    ));

    h.registry.destroy();
    heartbeat.beat();
    tokio::time::timeout(SEC, task).await.expect("sweeper stops").unwrap();
}

#[tokio::test]
async fn test_enroller_resets_tagged_items_periodically() {
    let h = Harness::new();
    h.tags.tag("debris", [1, 2]);
    let token = CancellationToken::new();
    let counters = Arc::new(tagged::Counters::new());

    let cfg = Tagged {
        enabled: true,
        tag: "debris".to_string(),
        ttl: 2 * SEC,
        interval: Duration::from_millis(10),
    };
    let task = tokio::spawn(tagged::run(
        h.registry.clone(),
        cfg,
        token.clone(),
        counters.clone(),
        Arc::new(AtomicI64::new(0)),
    ));

    settle().await;
    assert_eq!(h.registry.count(), 2);
    assert_eq!(h.registry.get_info(&1).unwrap().ttl, 2 * SEC);

    h.clock.set(SEC);
    settle().await;
    assert_eq!(
        h.registry.get_info(&1).unwrap().registered_at,
        1_000_000_000,
        "each run restarts the countdown"
    );

    token.cancel();
    task.await.unwrap();
    let stats = counters.reset();
    assert!(stats.runs >= 2);
    assert!(stats.enrolled >= 4);
    assert_eq!(stats.errors, 0);
}

#[tokio::test]
async fn test_enroller_stops_on_destroy() {
    let h = Harness::new();
    let cfg = Tagged {
        enabled: true,
        tag: "debris".to_string(),
        ttl: SEC,
        interval: Duration::from_millis(5),
    };
    let task = tokio::spawn(tagged::run(
        h.registry.clone(),
        cfg,
        CancellationToken::new(),
        Arc::new(tagged::Counters::new()),
        Arc::new(AtomicI64::new(0)),
    ));

    h.registry.destroy();
    tokio::time::timeout(SEC, task).await.expect("enroller stops").unwrap();
}

#[tokio::test]
async fn test_telemetry_drains_counters() {
    let h = Harness::new();
    let token = CancellationToken::new();
    let sweeps = Arc::new(sweeper::Counters::new());
    let enrollments = Arc::new(tagged::Counters::new());

    sweeps.sweeps.fetch_add(3, Ordering::Relaxed);
    enrollments.runs.fetch_add(2, Ordering::Relaxed);

    let task = tokio::spawn(super::telemetry::logger(
        token.clone(),
        h.registry.clone(),
        sweeps.clone(),
        enrollments.clone(),
        Arc::new(AtomicI64::new(0)),
        Duration::from_millis(10),
    ));

    settle().await;
    assert_eq!(sweeps.sweeps.load(Ordering::Relaxed), 0);
    assert_eq!(enrollments.runs.load(Ordering::Relaxed), 0);

    token.cancel();
    task.await.unwrap();
}
