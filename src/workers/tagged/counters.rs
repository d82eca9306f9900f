// Package tagged provides counters for background enrollment.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for enrollment runs.
#[derive(Default)]
pub struct Counters {
    /// Enrollment runs attempted.
    pub runs: AtomicU64,
    /// Handles enrolled (or re-enrolled) across runs.
    pub enrolled: AtomicU64,
    /// Runs rejected by the registry.
    pub errors: AtomicU64,
}

/// Counter values taken by [`Counters::reset`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub runs: u64,
    pub enrolled: u64,
    pub errors: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all counters and returns their previous values.
    pub fn reset(&self) -> Stats {
        Stats {
            runs: self.runs.swap(0, Ordering::Relaxed),
            enrolled: self.enrolled.swap(0, Ordering::Relaxed),
            errors: self.errors.swap(0, Ordering::Relaxed),
        }
    }
}
