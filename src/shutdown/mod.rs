// Package shutdown turns the host shutdown notification into a reaper teardown.

use anyhow::Result;
use std::time::Duration;
use tokio::signal;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::model::Handle;
use crate::reaper::Reaper;


const DEFAULT_TEARDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
#[error("reaper teardown exceeded {0:?}")]
pub struct TeardownTimeout(pub Duration);

/// Destroys a reaper once the host goes down.
#[derive(Clone)]
pub struct GracefulShutdown {
    shutdown_token: CancellationToken,
    teardown_timeout: Duration,
}

impl GracefulShutdown {
    pub fn new(shutdown_token: CancellationToken) -> Self {
        Self {
            shutdown_token,
            teardown_timeout: DEFAULT_TEARDOWN_TIMEOUT,
        }
    }

    /// Bounds how long [`Reaper::destroy`] may take.
    pub fn with_timeout(mut self, teardown_timeout: Duration) -> Self {
        self.teardown_timeout = teardown_timeout;
        self
    }

    /// Waits for Ctrl-C or token cancellation, then destroys `reaper`.
    pub async fn await_shutdown<H: Handle>(&self, reaper: &Reaper<H>) -> Result<()> {
        let trigger = tokio::select! {
            biased;
            _ = self.shutdown_token.cancelled() => "token",
            _ = signal::ctrl_c() => "SIGINT",
        };
        info!(component = "shutdown", event = "host_down", trigger, "tearing reaper down");

        self.teardown(reaper).await
    }

    async fn teardown<H: Handle>(&self, reaper: &Reaper<H>) -> Result<()> {
        self.shutdown_token.cancel();

        if timeout(self.teardown_timeout, reaper.destroy()).await.is_err() {
            warn!(
                component = "shutdown",
                event = "teardown_timeout",
                timeout_ms = self.teardown_timeout.as_millis() as u64,
                "reaper was not torn down in time"
            );
            return Err(TeardownTimeout(self.teardown_timeout).into());
        }

        info!(component = "shutdown", event = "teardown_done", "reaper torn down");
        Ok(())
    }
}
