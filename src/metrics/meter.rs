use crate::workers::{sweeper, tagged};

// Metric name constants
pub const SWEEPS: &str = "reaper_sweeps_total";
pub const SCANNED: &str = "reaper_scanned_total";
pub const EXPIRED: &str = "reaper_expired_total";
pub const INVALIDATED: &str = "reaper_invalidated_total";
pub const DESTROY_FAILURES: &str = "reaper_destroy_failures_total";
pub const CALLBACK_FAILURES: &str = "reaper_callback_failures_total";
pub const MISSED_TICKS: &str = "reaper_missed_ticks_total";

pub const TAGGED_RUNS: &str = "reaper_tagged_runs_total";
pub const TAGGED_ENROLLED: &str = "reaper_tagged_enrolled_total";
pub const TAGGED_ERRORS: &str = "reaper_tagged_errors_total";

pub const TRACKED: &str = "reaper_tracked";
pub const GROUPS: &str = "reaper_groups";

/// Adds sweeper counters.
pub fn add_sweep_stat_counters(s: &sweeper::Stats) {
    metrics::counter!(SWEEPS).increment(s.sweeps);
    metrics::counter!(SCANNED).increment(s.scanned);
    metrics::counter!(EXPIRED).increment(s.expired);
    metrics::counter!(INVALIDATED).increment(s.invalidated);
    metrics::counter!(DESTROY_FAILURES).increment(s.destroy_failures);
    metrics::counter!(CALLBACK_FAILURES).increment(s.callback_failures);
    metrics::counter!(MISSED_TICKS).increment(s.missed_ticks);
}

/// Adds tag enrollment counters.
pub fn add_tagged_stat_counters(s: &tagged::Stats) {
    metrics::counter!(TAGGED_RUNS).increment(s.runs);
    metrics::counter!(TAGGED_ENROLLED).increment(s.enrolled);
    metrics::counter!(TAGGED_ERRORS).increment(s.errors);
}

/// Sets the tracked items and pending groups gauges.
pub fn set_tracked(items: usize, groups: usize) {
    metrics::gauge!(TRACKED).set(items as f64);
    metrics::gauge!(GROUPS).set(groups as f64);
}
