//! Sweeper subscription: one sweep per heartbeat tick.

pub mod counters;
pub mod sweeper;

// Re-export main types
pub use counters::{Counters, Stats};
pub use sweeper::run;
