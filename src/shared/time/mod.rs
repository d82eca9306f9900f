//! Monotonic clocks used by the registry to timestamp registrations.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;


/// Source of monotonic timestamps in nanoseconds.
///
/// Timestamps from one clock are only comparable with each other; the origin
/// is arbitrary.
pub trait Clock: Send + Sync {
    /// Returns the current timestamp in nanoseconds.
    fn now(&self) -> i64;
}

/// Converts a duration to signed nanoseconds, saturating at `i64::MAX`.
pub fn nanos(d: Duration) -> i64 {
    i64::try_from(d.as_nanos()).unwrap_or(i64::MAX)
}

/// Converts signed nanoseconds back into a duration; negative values become zero.
pub fn duration(nanos: i64) -> Duration {
    Duration::from_nanos(nanos.max(0) as u64)
}

/// Clock reading `Instant` on every call.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> i64 {
        nanos(self.origin.elapsed())
    }
}

/// Cached time to avoid reading the OS clock on every call.
///
/// A background ticker refreshes the value at the given resolution, so
/// readings lag real time by at most one resolution step.
#[derive(Debug, Clone)]
pub struct CachedClock {
    origin: Instant,
    now: Arc<AtomicI64>,
}

impl CachedClock {
    /// Starts the time caching ticker.
    /// Returns the clock and the token that stops the ticker.
    /// Must be called from within a tokio runtime.
    pub fn start(resolution: Duration) -> (Self, CancellationToken) {
        let clock = Self {
            origin: Instant::now(),
            now: Arc::new(AtomicI64::new(0)),
        };

        let token = CancellationToken::new();
        let token_clone = token.clone();
        let ticker = clock.clone();

        tokio::task::spawn(async move {
            let mut interval = tokio::time::interval(resolution);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        ticker.refresh();
                    }
                    _ = token_clone.cancelled() => {
                        break;
                    }
                }
            }
        });

        (clock, token)
    }

    fn refresh(&self) {
        self.now.store(nanos(self.origin.elapsed()), Ordering::Relaxed);
    }
}

impl Clock for CachedClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::Relaxed)
    }
}

/// Clock that only moves when told to. Intended for tests and for hosts that
/// run on simulated time.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `d`.
    pub fn advance(&self, d: Duration) {
        self.now.fetch_add(nanos(d), Ordering::Relaxed);
    }

    /// Sets the clock to `d` past its origin.
    pub fn set(&self, d: Duration) {
        self.now.store(nanos(d), Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::Relaxed)
    }
}
