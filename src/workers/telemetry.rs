// Package workers provides periodic stats logging for the reaper tasks.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

use crate::db::Registry;
use crate::metrics;
use crate::model::Handle;

use super::{sweeper, tagged};

/// Telemetry logger for the sweeper and the tag enroller.
pub async fn logger<H: Handle>(
    shutdown_token: CancellationToken,
    registry: Arc<Registry<H>>,
    sweeps: Arc<sweeper::Counters>,
    enrollments: Arc<tagged::Counters>,
    w_num_active: Arc<AtomicI64>,
    each: Duration,
) {
    let mut ticker = interval(each);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown_token.cancelled() => {
                tracing::debug!(component = "telemetry", "logger stopped");
                return;
            }
            _ = ticker.tick() => {
                let workers = w_num_active.load(Ordering::Relaxed);
                let tracked = registry.count();
                let groups = registry.group_count();
                let s = sweeps.reset();
                let t = enrollments.reset();

                metrics::add_sweep_stat_counters(&s);
                metrics::add_tagged_stat_counters(&t);
                metrics::set_tracked(tracked, groups);

                tracing::info!(
                    component = "telemetry",
                    workers,
                    tracked,
                    groups,
                    sweeps = s.sweeps,
                    scanned = s.scanned,
                    expired = s.expired,
                    invalidated = s.invalidated,
                    destroy_failures = s.destroy_failures,
                    callback_failures = s.callback_failures,
                    missed_ticks = s.missed_ticks,
                    tagged_runs = t.runs,
                    tagged_enrolled = t.enrolled,
                    tagged_errors = t.errors,
                    "reaper stats"
                );
            }
        }
    }
}
