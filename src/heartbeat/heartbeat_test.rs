use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::Heartbeat;

#[tokio::test]
async fn test_beat_reaches_subscribers() {
    let hb = Heartbeat::new();
    assert_eq!(hb.beat(), 0, "no subscriber yet");

    let mut rx = hb.subscribe();
    assert_eq!(hb.subscribers(), 1);
    assert_eq!(hb.beat(), 1);
    assert_eq!(rx.recv().await.unwrap(), 2);

    drop(rx);
    assert_eq!(hb.subscribers(), 0);
    assert_eq!(hb.beats(), 2);
}

#[tokio::test]
async fn test_interval_beats_until_cancelled() {
    let hb = Arc::new(Heartbeat::new());
    let mut rx = hb.subscribe();
    let token = CancellationToken::new();

    let handle = hb.spawn_interval(Duration::from_millis(5), token.clone());
    rx.recv().await.unwrap();
    rx.recv().await.unwrap();

    token.cancel();
    handle.await.unwrap();
    let beats = hb.beats();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(hb.beats(), beats);
}
