//! Metrics exported through the `metrics` facade.
//!
//! Counters are flushed from the worker counters by the telemetry logger;
//! the host decides which exporter (if any) is installed.

pub mod meter;

// Re-export commonly used items
pub use meter::*;
