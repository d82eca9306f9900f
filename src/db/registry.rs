//! Registry: handle -> tracked item map and its public operations.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::backend::{ResourceBackend, TagIndex};
use crate::config::{Config, ConfigTrait, Ttl};
use crate::error::ReaperError;
use crate::model::{Group, GroupCallback, GroupId, Handle, ItemCallback, ItemInfo, TrackedItem};
use crate::time::Clock;

use super::gate::Gate;
use super::groups::GroupTracker;

pub(crate) struct State<H> {
    pub(crate) items: HashMap<H, TrackedItem<H>>,
    pub(crate) groups: GroupTracker<H>,
}

/// Registry tracks pending expirations for externally owned resources.
///
/// Every public call and every sweep pass takes the state lock for its own
/// bookkeeping only. Collaborators (destroy primitive, callbacks) always run
/// with the lock released, so they may call back into the registry.
pub struct Registry<H: Handle> {
    pub(crate) state: Mutex<State<H>>,
    destroyed: AtomicBool,
    seq: AtomicU64,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) gate: Gate<H>,
    tags: Arc<dyn TagIndex<H>>,
}

impl<H: Handle> Registry<H> {
    /// Creates an empty registry.
    pub fn new(
        bounds: Ttl,
        clock: Arc<dyn Clock>,
        backend: Arc<dyn ResourceBackend<H>>,
        tags: Arc<dyn TagIndex<H>>,
    ) -> Self {
        Self {
            state: Mutex::new(State {
                items: HashMap::new(),
                groups: GroupTracker::new(),
            }),
            destroyed: AtomicBool::new(false),
            seq: AtomicU64::new(0),
            clock,
            gate: Gate::new(backend, bounds),
            tags,
        }
    }

    /// Creates an empty registry bounded by the configured TTL limits.
    pub fn from_config(
        cfg: &Config,
        clock: Arc<dyn Clock>,
        backend: Arc<dyn ResourceBackend<H>>,
        tags: Arc<dyn TagIndex<H>>,
    ) -> Self {
        Self::new(*cfg.ttl(), clock, backend, tags)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }

    pub fn bounds(&self) -> &Ttl {
        self.gate.bounds()
    }

    pub(crate) fn ensure_alive(&self) -> Result<(), ReaperError> {
        if self.is_destroyed() {
            Err(ReaperError::Destroyed)
        } else {
            Ok(())
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Starts tracking `handle`. Any previous registration of the same handle
    /// is dropped first, without firing its callback.
    pub fn add(
        &self,
        handle: H,
        ttl: Duration,
        callback: Option<ItemCallback<H>>,
    ) -> Result<(), ReaperError> {
        self.ensure_alive()?;
        self.gate.check_handle(&handle)?;
        self.gate.check_ttl(ttl)?;

        let item = TrackedItem::new(self.next_seq(), self.clock.now(), ttl, callback);
        let replaced = {
            let mut state = self.state.lock();
            // destroy() may have cleared the maps since the first check
            self.ensure_alive()?;
            state.items.insert(handle.clone(), item)
        };

        debug!(
            component = "registry",
            event = "added",
            handle = ?handle,
            ttl = ?ttl,
            replaced = replaced.is_some(),
            "handle tracked"
        );
        Ok(())
    }

    /// Tracks every valid handle of `handles` as one group. The callback fires
    /// once with the original list after the last tracked member is removed.
    ///
    /// Invalid members are skipped. Returns `Ok(None)` when no member is valid;
    /// in that case no group exists and the callback is dropped unfired.
    pub fn add_group(
        &self,
        handles: Vec<H>,
        ttl: Duration,
        callback: Option<GroupCallback<H>>,
    ) -> Result<Option<GroupId>, ReaperError> {
        self.ensure_alive()?;
        self.gate.check_ttl(ttl)?;

        let mut seen = HashSet::with_capacity(handles.len());
        let mut valid = Vec::with_capacity(handles.len());
        for handle in &handles {
            if let Err(e) = self.gate.check_handle(handle) {
                warn!(
                    component = "registry",
                    event = "group_member_skipped",
                    error = %e,
                    "group member failed validation"
                );
                continue;
            }
            if seen.insert(handle.clone()) {
                valid.push(handle.clone());
            }
        }

        if valid.is_empty() {
            debug!(
                component = "registry",
                event = "group_empty",
                members = handles.len(),
                "no valid group member, group not created"
            );
            return Ok(None);
        }

        let now = self.clock.now();
        let tracked = valid.len();
        let (id, replaced) = {
            let mut state = self.state.lock();
            self.ensure_alive()?;

            let id = state.groups.next_id();
            let mut replaced = Vec::new();
            for handle in valid {
                let item = TrackedItem::member(self.next_seq(), now, ttl, id);
                if let Some(prev) = state.items.insert(handle, item) {
                    replaced.push(prev);
                }
            }
            state.groups.insert(id, Group::new(handles, tracked, callback));
            (id, replaced)
        };

        debug!(
            component = "registry",
            event = "group_added",
            group = %id,
            tracked,
            replaced = replaced.len(),
            ttl = ?ttl,
            "group tracked"
        );
        Ok(Some(id))
    }

    /// Stops tracking `handle` without firing any callback or group accounting.
    /// Returns whether an entry was removed.
    pub fn cancel(&self, handle: &H) -> Result<bool, ReaperError> {
        self.ensure_alive()?;
        let removed = self.state.lock().items.remove(handle);
        if removed.is_some() {
            debug!(component = "registry", event = "cancelled", handle = ?handle, "handle untracked");
        }
        Ok(removed.is_some())
    }

    /// Freezes the countdown of a running item. Returns whether the state changed.
    pub fn pause(&self, handle: &H) -> Result<bool, ReaperError> {
        self.ensure_alive()?;
        let now = self.clock.now();
        let changed = self
            .state
            .lock()
            .items
            .get_mut(handle)
            .is_some_and(|item| item.pause(now));
        if changed {
            debug!(component = "registry", event = "paused", handle = ?handle, "countdown paused");
        }
        Ok(changed)
    }

    /// Restarts the countdown of a paused item with the time it had left.
    /// Returns whether the state changed.
    pub fn resume(&self, handle: &H) -> Result<bool, ReaperError> {
        self.ensure_alive()?;
        let now = self.clock.now();
        let changed = self
            .state
            .lock()
            .items
            .get_mut(handle)
            .is_some_and(|item| item.resume(now));
        if changed {
            debug!(component = "registry", event = "resumed", handle = ?handle, "countdown resumed");
        }
        Ok(changed)
    }

    /// Removes every tracked item through the regular removal path, callbacks
    /// and group completion included. Returns the number of items removed.
    pub fn clear_all(&self) -> Result<usize, ReaperError> {
        self.ensure_alive()?;

        let entries: Vec<(H, u64)> = {
            let state = self.state.lock();
            state
                .items
                .iter()
                .map(|(h, item)| (h.clone(), item.seq))
                .collect()
        };

        let removed = entries
            .into_iter()
            .filter(|(handle, seq)| self.remove_entry(handle, |item| item.seq == *seq).is_some())
            .count();

        info!(component = "registry", event = "cleared", removed, "all tracked items removed");
        Ok(removed)
    }

    /// Number of tracked items. Zero once destroyed.
    pub fn count(&self) -> usize {
        if self.is_destroyed() {
            return 0;
        }
        self.state.lock().items.len()
    }

    /// Snapshot of the item tracked for `handle`. `None` once destroyed.
    pub fn get_info(&self, handle: &H) -> Option<ItemInfo> {
        if self.is_destroyed() {
            return None;
        }
        self.state.lock().items.get(handle).map(TrackedItem::info)
    }

    /// Number of groups still waiting for members to go.
    pub fn group_count(&self) -> usize {
        self.state.lock().groups.len()
    }

    /// Members still counted against group `id`, if the group is pending.
    pub fn group_remaining(&self, id: GroupId) -> Option<usize> {
        self.state.lock().groups.get(id).map(|g| g.remaining())
    }

    /// Enrolls every valid handle carrying `tag`, with `ttl` or the configured
    /// default. Already tracked handles restart with the fresh TTL.
    /// Returns the number of handles enrolled.
    pub fn cleanup_all_tagged(&self, tag: &str, ttl: Option<Duration>) -> Result<usize, ReaperError> {
        self.ensure_alive()?;
        Gate::<H>::check_tag(tag)?;
        let ttl = ttl.unwrap_or(self.bounds().default);
        self.gate.check_ttl(ttl)?;

        let mut enrolled = 0;
        for handle in self.tags.query_by_tag(tag) {
            if !self.gate.is_valid(&handle) {
                continue;
            }
            match self.add(handle, ttl, None) {
                Ok(()) => enrolled += 1,
                Err(ReaperError::Destroyed) => return Err(ReaperError::Destroyed),
                Err(e) => {
                    warn!(
                        component = "registry",
                        event = "tagged_rejected",
                        tag,
                        error = %e,
                        "tagged handle was not enrolled"
                    );
                }
            }
        }

        debug!(component = "registry", event = "tagged_enrolled", tag, enrolled, ttl = ?ttl, "tagged handles enrolled");
        Ok(enrolled)
    }

    /// Tears the registry down: marks it destroyed and drops every item and
    /// group without firing callbacks. Returns true on the first call only.
    pub fn destroy(&self) -> bool {
        if self.destroyed.swap(true, Ordering::AcqRel) {
            return false;
        }

        let (items, groups) = {
            let mut state = self.state.lock();
            (std::mem::take(&mut state.items), state.groups.drain())
        };

        info!(
            component = "registry",
            event = "destroyed",
            items = items.len(),
            groups = groups.len(),
            "registry destroyed"
        );
        true
    }
}
