//! Tracking record for one handle.

use std::time::Duration;

use super::callback::ItemCallback;
use super::group::GroupId;
use crate::time;

/// TrackedItem is the scheduling record kept for a tracked handle.
pub struct TrackedItem<H> {
    /// Registration sequence number, unique per registry.
    pub(crate) seq: u64,
    /// Set at registration, recomputed on resume.
    pub(crate) registered_at: i64,
    pub(crate) ttl: Duration,
    pub(crate) paused: bool,
    /// TTL minus elapsed at pause time, in nanoseconds. May be negative when
    /// the item was already overdue but not yet swept.
    pub(crate) remaining: Option<i64>,
    pub(crate) group: Option<GroupId>,
    pub(crate) callback: Option<ItemCallback<H>>,
}

impl<H> TrackedItem<H> {
    /// Creates a running standalone item.
    pub(crate) fn new(seq: u64, now: i64, ttl: Duration, callback: Option<ItemCallback<H>>) -> Self {
        Self {
            seq,
            registered_at: now,
            ttl,
            paused: false,
            remaining: None,
            group: None,
            callback,
        }
    }

    /// Creates a running group member. Members never carry their own callback.
    pub(crate) fn member(seq: u64, now: i64, ttl: Duration, group: GroupId) -> Self {
        Self {
            seq,
            registered_at: now,
            ttl,
            paused: false,
            remaining: None,
            group: Some(group),
            callback: None,
        }
    }

    /// Reports whether the countdown has run out at `now`. Paused items never expire.
    pub(crate) fn is_expired(&self, now: i64) -> bool {
        !self.paused && now.saturating_sub(self.registered_at) >= time::nanos(self.ttl)
    }

    /// Stops the countdown. Returns false if already paused.
    pub(crate) fn pause(&mut self, now: i64) -> bool {
        if self.paused {
            return false;
        }
        let elapsed = now.saturating_sub(self.registered_at);
        self.remaining = Some(time::nanos(self.ttl).saturating_sub(elapsed));
        self.paused = true;
        true
    }

    /// Restarts the countdown so it ends `remaining` after `now`.
    /// Returns false if not paused.
    pub(crate) fn resume(&mut self, now: i64) -> bool {
        if !self.paused {
            return false;
        }
        let remaining = self.remaining.take().unwrap_or(0);
        let consumed = time::nanos(self.ttl).saturating_sub(remaining);
        self.registered_at = now.saturating_sub(consumed);
        self.paused = false;
        true
    }

    /// Takes an owned snapshot of the record.
    pub(crate) fn info(&self) -> ItemInfo {
        ItemInfo {
            registered_at: self.registered_at,
            ttl: self.ttl,
            paused: self.paused,
            remaining: self.remaining.map(time::duration),
            group: self.group,
            has_callback: self.callback.is_some(),
        }
    }
}

/// Point-in-time copy of a tracked item. Mutating it has no effect on the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    /// Clock timestamp (nanoseconds) of registration or of the last resume.
    pub registered_at: i64,
    pub ttl: Duration,
    pub paused: bool,
    /// Time left at the moment of pausing, saturated at zero. Only set while paused.
    pub remaining: Option<Duration>,
    pub group: Option<GroupId>,
    pub has_callback: bool,
}

impl ItemInfo {
    /// Clock timestamp at which a running item becomes eligible for removal.
    pub fn expires_at(&self) -> Option<i64> {
        if self.paused {
            None
        } else {
            Some(self.registered_at.saturating_add(time::nanos(self.ttl)))
        }
    }
}
