use std::fmt::Debug;
use std::hash::Hash;

/// Handle identifies an externally owned resource under tracking.
///
/// It is used as a map key for the whole tracking lifetime, so equality and
/// hashing must stay stable while the resource is tracked.
pub trait Handle: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T> Handle for T where T: Eq + Hash + Clone + Debug + Send + Sync + 'static {}
