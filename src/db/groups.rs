//! Group tracker: cohort state consulted during item removal.

use std::collections::HashMap;

use crate::model::{Group, GroupId};

/// GroupTracker maps group identifiers to cohort state.
pub struct GroupTracker<H> {
    groups: HashMap<GroupId, Group<H>>,
    last_id: u64,
}

impl<H> GroupTracker<H> {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            last_id: 0,
        }
    }

    /// Allocates an identifier that was never handed out before by this tracker.
    pub(crate) fn next_id(&mut self) -> GroupId {
        self.last_id += 1;
        GroupId(self.last_id)
    }

    pub(crate) fn insert(&mut self, id: GroupId, group: Group<H>) {
        self.groups.insert(id, group);
    }

    /// Accounts for one removed member of `id`. When it was the last one the
    /// group is deleted and handed back so its callback can fire exactly once.
    pub(crate) fn release(&mut self, id: GroupId) -> Option<Group<H>> {
        let done = self.groups.get_mut(&id)?.release_one();
        if done {
            self.groups.remove(&id)
        } else {
            None
        }
    }

    pub fn get(&self, id: GroupId) -> Option<&Group<H>> {
        self.groups.get(&id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Removes every group without firing callbacks.
    pub(crate) fn drain(&mut self) -> Vec<Group<H>> {
        self.groups.drain().map(|(_, g)| g).collect()
    }
}

impl<H> Default for GroupTracker<H> {
    fn default() -> Self {
        Self::new()
    }
}
