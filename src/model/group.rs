//! Cohort of tracked items sharing one completion callback.

use std::fmt;

use super::callback::GroupCallback;

/// Identifier of a group, unique for the lifetime of its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) u64);

impl GroupId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

/// Group tracks how many of its members are still registered.
pub struct Group<H> {
    /// Original member list as passed by the caller, invalid handles included.
    pub(crate) members: Vec<H>,
    pub(crate) remaining: usize,
    pub(crate) callback: Option<GroupCallback<H>>,
}

impl<H> Group<H> {
    pub(crate) fn new(members: Vec<H>, remaining: usize, callback: Option<GroupCallback<H>>) -> Self {
        Self {
            members,
            remaining,
            callback,
        }
    }

    /// Accounts for one removed member, floored at zero.
    /// Returns true once no member is left.
    pub(crate) fn release_one(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    pub fn members(&self) -> &[H] {
        &self.members
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}
