// Reaper lifecycle implementation.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::backend::{ResourceBackend, TagIndex};
use crate::config::{Config, ConfigTrait};
use crate::db::Registry;
use crate::heartbeat::Heartbeat;
use crate::model::Handle;
use crate::time::Clock;
use crate::workers::{sweeper, tagged, telemetry};

/// Reaper owns a registry together with the tasks that keep it moving: the
/// sweeper subscribed to the host heartbeat, the tag enroller and the stats
/// logger.
pub struct Reaper<H: Handle> {
    cfg: Config,
    registry: Arc<Registry<H>>,
    shutdown_token: CancellationToken,
    w_wg: Mutex<JoinSet<()>>,
    w_num_active: Arc<AtomicI64>,
    sweeps: Arc<sweeper::Counters>,
    enrollments: Arc<tagged::Counters>,
    inited: AtomicBool,
    destroyed: AtomicBool,
}

impl<H: Handle> Reaper<H> {
    /// Creates a reaper. Its tasks stop when `shutdown_token` is cancelled;
    /// the registry itself is only torn down by [`Reaper::destroy`].
    pub fn new(
        shutdown_token: CancellationToken,
        cfg: Config,
        clock: Arc<dyn Clock>,
        backend: Arc<dyn ResourceBackend<H>>,
        tags: Arc<dyn TagIndex<H>>,
    ) -> Self {
        let registry = Arc::new(Registry::from_config(&cfg, clock, backend, tags));
        Self {
            cfg,
            registry,
            shutdown_token: shutdown_token.child_token(),
            w_wg: Mutex::new(JoinSet::new()),
            w_num_active: Arc::new(AtomicI64::new(0)),
            sweeps: Arc::new(sweeper::Counters::new()),
            enrollments: Arc::new(tagged::Counters::new()),
            inited: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
        }
    }

    /// The registry carrying the public tracking operations.
    pub fn registry(&self) -> &Arc<Registry<H>> {
        &self.registry
    }

    /// Number of background tasks currently running.
    pub fn workers(&self) -> i64 {
        self.w_num_active.load(Ordering::Relaxed)
    }

    pub fn sweep_counters(&self) -> &Arc<sweeper::Counters> {
        &self.sweeps
    }

    pub fn tagged_counters(&self) -> &Arc<tagged::Counters> {
        &self.enrollments
    }

    /// Subscribes the sweeper to `heartbeat` and starts the background tasks.
    /// Returns false if the reaper was already served or destroyed.
    pub async fn serve(&self, heartbeat: &Heartbeat) -> bool {
        if self.destroyed.load(Ordering::Acquire)
            || self
                .inited
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
        {
            return false;
        }

        let mut wg = self.w_wg.lock().await;

        wg.spawn(sweeper::run(
            self.registry.clone(),
            heartbeat.subscribe(),
            self.shutdown_token.clone(),
            self.sweeps.clone(),
            self.w_num_active.clone(),
        ));

        let tagged_cfg = self.cfg.tagged().clone();
        if tagged_cfg.enabled {
            info!(
                component = "reaper",
                event = "tagged_enabled",
                tag = %tagged_cfg.tag,
                ttl = ?tagged_cfg.ttl,
                interval = ?tagged_cfg.interval,
                "tagged enrollment enabled"
            );
            wg.spawn(tagged::run(
                self.registry.clone(),
                tagged_cfg,
                self.shutdown_token.clone(),
                self.enrollments.clone(),
                self.w_num_active.clone(),
            ));
        }

        wg.spawn(telemetry::logger(
            self.shutdown_token.clone(),
            self.registry.clone(),
            self.sweeps.clone(),
            self.enrollments.clone(),
            self.w_num_active.clone(),
            self.cfg.sweep().stats_interval,
        ));

        info!(component = "reaper", event = "started", "reaper lifecycle");
        true
    }

    /// Serves with a heartbeat of its own, ticking every `sweep.interval`.
    /// Returns the heartbeat so the host can add subscribers or beat manually.
    pub async fn start(&self) -> Option<Arc<Heartbeat>> {
        let heartbeat = Arc::new(Heartbeat::new());
        if !self.serve(&heartbeat).await {
            return None;
        }

        let ticker = heartbeat.spawn_interval(self.cfg.sweep().interval, self.shutdown_token.clone());
        self.w_wg.lock().await.spawn(async move {
            if let Err(e) = ticker.await {
                warn!(component = "reaper", event = "heartbeat_failed", error = %e, "heartbeat task failed");
            }
        });

        Some(heartbeat)
    }

    /// Tears the reaper down: stops the background tasks, destroys the
    /// registry, then joins the tasks, which unsubscribes the sweeper. The
    /// registry rejects mutations from the first poll on. Only the first call
    /// has an effect; it returns true.
    pub async fn destroy(&self) -> bool {
        if self.destroyed.swap(true, Ordering::AcqRel) {
            return false;
        }

        self.shutdown_token.cancel();
        self.registry.destroy();
        {
            let mut wg = self.w_wg.lock().await;
            while let Some(res) = wg.join_next().await {
                if let Err(e) = res {
                    warn!(component = "reaper", event = "task_failed", error = %e, "background task failed");
                }
            }
        }

        info!(component = "reaper", event = "destroyed", "reaper destroyed");
        true
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }
}

impl<H: Handle> Drop for Reaper<H> {
    fn drop(&mut self) {
        self.shutdown_token.cancel();
    }
}
