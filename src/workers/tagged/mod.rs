//! Background enrollment of tag-classified resources.

pub mod counters;
pub mod enroller;

// Re-export main types
pub use counters::{Counters, Stats};
pub use enroller::run;
