// Registry wired to fake collaborators and a manual clock.

use std::sync::Arc;
use std::time::Duration;

use super::backend::{FakeBackend, FakeTags};
use crate::config;
use crate::db::Registry;
use crate::time::ManualClock;

pub struct Harness {
    pub registry: Arc<Registry<u64>>,
    pub clock: Arc<ManualClock>,
    pub backend: Arc<FakeBackend>,
    pub tags: Arc<FakeTags>,
}

impl Harness {
    /// Builds a registry over the test config with handles 1..=10 alive.
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        let backend = Arc::new(FakeBackend::new());
        let tags = Arc::new(FakeTags::new());
        backend.spawn(1..=10);

        let registry = Arc::new(Registry::<u64>::from_config(
            &config::new_test_config(),
            clock.clone(),
            backend.clone(),
            tags.clone(),
        ));

        Self {
            registry,
            clock,
            backend,
            tags,
        }
    }

    /// Moves the clock forward and runs one sweep.
    pub fn tick(&self, by: Duration) -> crate::db::SweepReport {
        self.clock.advance(by);
        self.registry.sweep()
    }

    /// Sets the clock to `secs` past origin and runs one sweep.
    pub fn sweep_at(&self, secs: u64) -> crate::db::SweepReport {
        self.clock.set(Duration::from_secs(secs));
        self.registry.sweep()
    }
}
