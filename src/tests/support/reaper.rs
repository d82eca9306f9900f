// Reaper wired to the fake collaborators.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::backend::{FakeBackend, FakeTags};
use crate::config::{self, Config};
use crate::reaper::Reaper;
use crate::time::ManualClock;

pub struct ReaperHarness {
    pub reaper: Reaper<u64>,
    pub token: CancellationToken,
    pub clock: Arc<ManualClock>,
    pub backend: Arc<FakeBackend>,
    pub tags: Arc<FakeTags>,
}

impl ReaperHarness {
    /// Builds a reaper over the test config with handles 1..=10 alive.
    pub fn new() -> Self {
        Self::with_config(config::new_test_config())
    }

    pub fn with_config(cfg: Config) -> Self {
        let token = CancellationToken::new();
        let clock = Arc::new(ManualClock::new());
        let backend = Arc::new(FakeBackend::new());
        let tags = Arc::new(FakeTags::new());
        backend.spawn(1..=10);

        let reaper = Reaper::<u64>::new(token.clone(), cfg, clock.clone(), backend.clone(), tags.clone());

        Self {
            reaper,
            token,
            clock,
            backend,
            tags,
        }
    }
}

/// Waits long enough for a few heartbeat ticks of the test config.
pub async fn settle() {
    tokio::time::sleep(std::time::Duration::from_millis(60)).await;
}
