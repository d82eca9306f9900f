// Background tasks owned by the reaper lifecycle.

pub mod guard;
pub mod sweeper;
pub mod tagged;
pub mod telemetry;

#[cfg(test)]
mod workers_test;

// Re-export main types
pub use guard::WorkerGuard;
