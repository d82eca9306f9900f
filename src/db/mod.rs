//! Registry of pending expirations and the sweep that drives removal.

pub mod gate;
pub mod groups;
pub mod registry;
pub mod removal;
pub mod sweep;


// Re-export main types
pub use gate::Gate;
pub use groups::GroupTracker;
pub use registry::Registry;
pub use sweep::SweepReport;
