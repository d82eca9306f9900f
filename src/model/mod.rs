// Package model provides tracking records and their public snapshots.

pub mod callback;
pub mod group;
pub mod handle;
pub mod item;


// Re-export main types
pub use callback::{on_group_done, on_removed, GroupCallback, ItemCallback};
pub use group::{Group, GroupId};
pub use handle::Handle;
pub use item::{ItemInfo, TrackedItem};
