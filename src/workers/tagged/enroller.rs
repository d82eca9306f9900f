// Package tagged periodically enrolls every resource carrying the configured tag.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::Tagged;
use crate::db::Registry;
use crate::error::ReaperError;
use crate::model::Handle;
use crate::workers::WorkerGuard;

use super::counters::Counters;

/// Calls `cleanup_all_tagged(cfg.tag, cfg.ttl)` every `cfg.interval` until
/// `token` is cancelled or the registry is destroyed. The first run happens
/// one interval after start.
pub async fn run<H: Handle>(
    registry: Arc<Registry<H>>,
    cfg: Tagged,
    token: CancellationToken,
    counters: Arc<Counters>,
    w_num_active: Arc<AtomicI64>,
) {
    let _guard = WorkerGuard::new(w_num_active, "tagged");

    let mut ticker = interval_at(Instant::now() + cfg.interval, cfg.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                return;
            }
            _ = ticker.tick() => {}
        }

        if token.is_cancelled() || registry.is_destroyed() {
            return;
        }

        counters.runs.fetch_add(1, Ordering::Relaxed);
        match registry.cleanup_all_tagged(&cfg.tag, Some(cfg.ttl)) {
            Ok(n) => {
                counters.enrolled.fetch_add(n as u64, Ordering::Relaxed);
            }
            Err(ReaperError::Destroyed) => {
                return;
            }
            Err(e) => {
                counters.errors.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(component = "tagged", event = "enroll_failed", tag = %cfg.tag, error = %e, "tagged enrollment failed");
            }
        }
    }
}
