use std::time::Duration;

use crate::support::{settle, Recorder, ReaperHarness};

const SEC: Duration = Duration::from_secs(1);

#[tokio::test]
async fn test_group_completion_through_ticks() {
    let h = ReaperHarness::new();
    let rec = Recorder::new();
    h.reaper.start().await.expect("reaper starts");
    let registry = h.reaper.registry();

    registry
        .add_group(vec![1, 2, 3], SEC, Some(rec.group()))
        .unwrap()
        .expect("group created");
    registry.pause(&3).unwrap();

    h.clock.set(SEC);
    settle().await;
    assert_eq!(registry.count(), 1);
    assert!(rec.groups().is_empty(), "paused member keeps the group open");

    // Paused at t=0 with the full second left, so it runs out at t=2.
    registry.resume(&3).unwrap();
    settle().await;
    assert_eq!(registry.count(), 1);

    h.clock.set(2 * SEC);
    settle().await;
    assert_eq!(registry.count(), 0);
    assert_eq!(rec.groups(), vec![vec![1, 2, 3]]);

    h.reaper.destroy().await;
}

#[tokio::test]
async fn test_group_with_invalid_members() {
    let h = ReaperHarness::new();
    let rec = Recorder::new();
    h.reaper.start().await.expect("reaper starts");
    let registry = h.reaper.registry();

    let id = registry
        .add_group(vec![1, 50], SEC, Some(rec.group()))
        .unwrap()
        .expect("group created");
    assert_eq!(registry.group_remaining(id), Some(1));

    h.clock.set(SEC);
    settle().await;
    assert_eq!(rec.groups(), vec![vec![1, 50]]);

    let none = registry.add_group(vec![50, 51], SEC, Some(rec.group())).unwrap();
    assert!(none.is_none());
    h.clock.set(5 * SEC);
    settle().await;
    assert_eq!(rec.groups().len(), 1);

    h.reaper.destroy().await;
}
