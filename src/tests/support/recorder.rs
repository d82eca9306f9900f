// Records callback invocations.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::model::{on_group_done, on_removed, GroupCallback, ItemCallback};

/// Recorder hands out callbacks that log what they were called with.
#[derive(Clone, Default)]
pub struct Recorder {
    items: Arc<Mutex<Vec<u64>>>,
    groups: Arc<Mutex<Vec<Vec<u64>>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self) -> ItemCallback<u64> {
        let items = self.items.clone();
        on_removed(move |h: &u64| {
            items.lock().push(*h);
            Ok(())
        })
    }

    /// Callback that records the call and then fails.
    pub fn failing_item(&self) -> ItemCallback<u64> {
        let items = self.items.clone();
        on_removed(move |h: &u64| {
            items.lock().push(*h);
            anyhow::bail!("callback for {} failed", h)
        })
    }

    /// Callback that records the call and then panics.
    pub fn panicking_item(&self) -> ItemCallback<u64> {
        let items = self.items.clone();
        on_removed(move |h: &u64| {
            items.lock().push(*h);
            panic!("callback for {} panicked", h)
        })
    }

    pub fn group(&self) -> GroupCallback<u64> {
        let groups = self.groups.clone();
        on_group_done(move |members: &[u64]| {
            groups.lock().push(members.to_vec());
            Ok(())
        })
    }

    pub fn items(&self) -> Vec<u64> {
        self.items.lock().clone()
    }

    pub fn groups(&self) -> Vec<Vec<u64>> {
        self.groups.lock().clone()
    }
}
