//! AdvReaper - time-based lifecycle manager for externally owned resources.
//!
//! Callers register resource handles with a TTL; a sweep driven by the host
//! heartbeat releases each resource once its TTL elapses, unless the
//! registration was cancelled or paused or the resource is already gone.

#[path = "shared/logs/mod.rs"]
pub mod logs;
#[path = "shared/time/mod.rs"]
pub mod time;
#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod backend;
pub mod config;
pub mod db;
pub mod error;
pub mod heartbeat;
pub mod metrics;
pub mod model;
pub mod reaper;
pub mod shutdown;
pub mod workers;

// Re-export main types
pub use backend::{NoTags, ResourceBackend, TagIndex};
pub use db::{Registry, SweepReport};
pub use error::ReaperError;
pub use heartbeat::Heartbeat;
pub use model::{on_group_done, on_removed, GroupId, Handle, ItemInfo};
pub use reaper::Reaper;
