// Fake collaborators: a resource backend and a tag index over u64 handles.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use crate::backend::{ResourceBackend, TagIndex};

/// FakeBackend keeps a set of live handles and records destroy calls.
#[derive(Default)]
pub struct FakeBackend {
    alive: Mutex<HashSet<u64>>,
    failing: Mutex<HashSet<u64>>,
    destroyed: Mutex<Vec<u64>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes handles live.
    pub fn spawn(&self, handles: impl IntoIterator<Item = u64>) {
        self.alive.lock().extend(handles);
    }

    /// Removes a handle behind the registry's back.
    pub fn kill(&self, handle: u64) {
        self.alive.lock().remove(&handle);
    }

    /// Makes destroy fail for `handle` while leaving it alive.
    pub fn fail_destroy(&self, handle: u64) {
        self.failing.lock().insert(handle);
    }

    /// Handles destroy was called for, in call order (failed calls included).
    pub fn destroyed(&self) -> Vec<u64> {
        self.destroyed.lock().clone()
    }

    pub fn is_alive(&self, handle: u64) -> bool {
        self.alive.lock().contains(&handle)
    }
}

impl ResourceBackend<u64> for FakeBackend {
    fn is_valid(&self, handle: &u64) -> bool {
        self.alive.lock().contains(handle)
    }

    fn destroy(&self, handle: &u64) -> anyhow::Result<()> {
        self.destroyed.lock().push(*handle);
        if self.failing.lock().contains(handle) {
            anyhow::bail!("resource {} is locked", handle);
        }
        self.alive.lock().remove(handle);
        Ok(())
    }
}

/// FakeTags maps tags to handles.
#[derive(Default)]
pub struct FakeTags {
    tags: Mutex<HashMap<String, Vec<u64>>>,
}

impl FakeTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(&self, tag: &str, handles: impl IntoIterator<Item = u64>) {
        self.tags
            .lock()
            .entry(tag.to_string())
            .or_default()
            .extend(handles);
    }
}

impl TagIndex<u64> for FakeTags {
    fn query_by_tag(&self, tag: &str) -> Vec<u64> {
        self.tags.lock().get(tag).cloned().unwrap_or_default()
    }
}
