//! Host tick signal driving the sweeper.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
mod heartbeat_test;

const CAPACITY: usize = 16;

/// Heartbeat fans host ticks out to every subscriber.
///
/// Hosts with their own frame loop call [`Heartbeat::beat`] once per frame;
/// timer-driven hosts use [`Heartbeat::spawn_interval`].
pub struct Heartbeat {
    tx: broadcast::Sender<u64>,
    beats: AtomicU64,
}

impl Heartbeat {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CAPACITY);
        Self {
            tx,
            beats: AtomicU64::new(0),
        }
    }

    /// Subscribes to ticks. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<u64> {
        self.tx.subscribe()
    }

    /// Emits one tick. Returns the number of subscribers it reached.
    pub fn beat(&self) -> usize {
        let n = self.beats.fetch_add(1, Ordering::Relaxed) + 1;
        self.tx.send(n).unwrap_or(0)
    }

    /// Ticks emitted so far.
    pub fn beats(&self) -> u64 {
        self.beats.load(Ordering::Relaxed)
    }

    pub fn subscribers(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Emits a tick every `every` until `token` is cancelled.
    pub fn spawn_interval(self: &Arc<Self>, every: Duration, token: CancellationToken) -> JoinHandle<()> {
        let heartbeat = self.clone();
        tokio::task::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        return;
                    }
                    _ = interval.tick() => {
                        heartbeat.beat();
                    }
                }
            }
        })
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new()
    }
}
