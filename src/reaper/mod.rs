//! Lifecycle controller: wires the registry to the heartbeat and the
//! background tasks, and tears everything down once.

pub mod reaper;

// Re-export main types
pub use reaper::Reaper;
