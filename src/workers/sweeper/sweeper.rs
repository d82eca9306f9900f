// Package sweeper runs the registry sweep on every heartbeat tick.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;

use crate::db::Registry;
use crate::model::Handle;
use crate::workers::WorkerGuard;

use super::counters::Counters;

/// Sweeps `registry` once per tick received on `ticks` until `token` is
/// cancelled, the heartbeat goes away or the registry is destroyed.
/// Returning drops `ticks`, which unsubscribes from the heartbeat.
pub async fn run<H: Handle>(
    registry: Arc<Registry<H>>,
    mut ticks: broadcast::Receiver<u64>,
    token: CancellationToken,
    counters: Arc<Counters>,
    w_num_active: Arc<AtomicI64>,
) {
    let _guard = WorkerGuard::new(w_num_active, "sweeper");

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                return;
            }
            tick = ticks.recv() => {
                match tick {
                    Ok(_) => {}
                    Err(RecvError::Lagged(missed)) => {
                        // One pass catches up on every missed tick.
                        counters.missed_ticks.fetch_add(missed, Ordering::Relaxed);
                        tracing::warn!(component = "sweeper", event = "lagged", missed, "sweeper is behind the heartbeat");
                    }
                    Err(RecvError::Closed) => {
                        return;
                    }
                }
            }
        }

        if registry.is_destroyed() {
            return;
        }
        let report = registry.sweep();
        counters.record(&report);
    }
}
