// Package sweeper provides counters for sweep passes.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::db::SweepReport;

/// Counters accumulated across sweep passes.
#[derive(Default)]
pub struct Counters {
    /// Sweep passes run.
    pub sweeps: AtomicU64,
    /// Items looked at by the scans.
    pub scanned: AtomicU64,
    /// Items removed because their TTL ran out.
    pub expired: AtomicU64,
    /// Items removed because their handle stopped validating.
    pub invalidated: AtomicU64,
    pub destroy_failures: AtomicU64,
    pub callback_failures: AtomicU64,
    /// Ticks dropped because the sweeper lagged behind the heartbeat.
    pub missed_ticks: AtomicU64,
}

/// Counter values taken by [`Counters::reset`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub sweeps: u64,
    pub scanned: u64,
    pub expired: u64,
    pub invalidated: u64,
    pub destroy_failures: u64,
    pub callback_failures: u64,
    pub missed_ticks: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sweep pass.
    pub fn record(&self, report: &SweepReport) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.scanned.fetch_add(report.scanned as u64, Ordering::Relaxed);
        self.expired.fetch_add(report.expired as u64, Ordering::Relaxed);
        self.invalidated.fetch_add(report.invalidated as u64, Ordering::Relaxed);
        self.destroy_failures.fetch_add(report.destroy_failures as u64, Ordering::Relaxed);
        self.callback_failures.fetch_add(report.callback_failures as u64, Ordering::Relaxed);
    }

    /// Resets all counters and returns their previous values.
    pub fn reset(&self) -> Stats {
        Stats {
            sweeps: self.sweeps.swap(0, Ordering::Relaxed),
            scanned: self.scanned.swap(0, Ordering::Relaxed),
            expired: self.expired.swap(0, Ordering::Relaxed),
            invalidated: self.invalidated.swap(0, Ordering::Relaxed),
            destroy_failures: self.destroy_failures.swap(0, Ordering::Relaxed),
            callback_failures: self.callback_failures.swap(0, Ordering::Relaxed),
            missed_ticks: self.missed_ticks.swap(0, Ordering::Relaxed),
        }
    }
}
