// Package workers provides the liveness guard for background tasks.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Guard to decrement active worker count on drop.
pub struct WorkerGuard {
    w_num_active: Arc<AtomicI64>,
    name: &'static str,
}

impl WorkerGuard {
    pub fn new(w_num_active: Arc<AtomicI64>, name: &'static str) -> Self {
        w_num_active.fetch_add(1, Ordering::Relaxed);
        tracing::info!(component = "workers", name, "worker upped");
        Self { w_num_active, name }
    }
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        self.w_num_active.fetch_sub(1, Ordering::Relaxed);
        tracing::info!(component = "workers", name = self.name, "worker is gone");
    }
}
