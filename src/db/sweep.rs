//! Two-phase sweep: scan a snapshot for candidates, then remove them.

use tracing::debug;

use crate::model::{Handle, TrackedItem};

use super::registry::Registry;

/// Outcome of one sweep pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Items looked at during the scan phase.
    pub scanned: usize,
    /// Removed because their countdown ran out.
    pub expired: usize,
    /// Removed because the handle stopped validating.
    pub invalidated: usize,
    pub destroy_failures: usize,
    pub callback_failures: usize,
}

impl SweepReport {
    pub fn removed(&self) -> usize {
        self.expired + self.invalidated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cause {
    Expired,
    Invalidated,
}

impl<H: Handle> Registry<H> {
    /// Runs one sweep pass. Meant to be called once per host tick.
    ///
    /// The scan works on a snapshot taken under the lock, so the map is never
    /// mutated while being iterated. Candidates whose registration changed
    /// since the scan (cancelled or re-added by an earlier callback) are left
    /// alone, and so are expired candidates paused in the meantime. A
    /// destroyed registry sweeps nothing.
    pub fn sweep(&self) -> SweepReport {
        let mut report = SweepReport::default();
        if self.is_destroyed() {
            return report;
        }

        let now = self.clock.now();
        let snapshot: Vec<(H, u64, bool)> = {
            let state = self.state.lock();
            state
                .items
                .iter()
                .map(|(h, item)| (h.clone(), item.seq, item.is_expired(now)))
                .collect()
        };
        report.scanned = snapshot.len();

        // Invalidation wins over pause: a resource destroyed elsewhere is
        // dropped from tracking even while its countdown is frozen.
        let candidates: Vec<(H, u64, Cause)> = snapshot
            .into_iter()
            .filter_map(|(h, seq, expired)| {
                if !self.gate.is_valid(&h) {
                    Some((h, seq, Cause::Invalidated))
                } else if expired {
                    Some((h, seq, Cause::Expired))
                } else {
                    None
                }
            })
            .collect();

        for (handle, seq, cause) in candidates {
            // Re-checked under the lock: an earlier callback or another thread
            // may have paused the item since the scan.
            let still_due = |item: &TrackedItem<H>| {
                item.seq == seq && (cause == Cause::Invalidated || item.is_expired(now))
            };
            let Some(removal) = self.remove_entry(&handle, still_due) else {
                continue;
            };
            match cause {
                Cause::Expired => report.expired += 1,
                Cause::Invalidated => report.invalidated += 1,
            }
            if removal.destroy_failed {
                report.destroy_failures += 1;
            }
            report.callback_failures += removal.callback_failures;
        }

        if report.removed() > 0 {
            debug!(
                component = "sweeper",
                event = "swept",
                scanned = report.scanned,
                expired = report.expired,
                invalidated = report.invalidated,
                destroy_failures = report.destroy_failures,
                callback_failures = report.callback_failures,
                "sweep removed items"
            );
        }

        report
    }
}
