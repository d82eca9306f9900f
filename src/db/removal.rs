//! Removal path shared by the sweep and clear_all, and the isolation of
//! collaborator failures along it.

use std::panic::{self, AssertUnwindSafe};
use tracing::error;

use crate::error::ReaperError;
use crate::model::{Group, Handle, TrackedItem};

use super::registry::Registry;

/// Failures observed while removing one item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub destroy_failed: bool,
    pub callback_failures: usize,
}

impl<H: Handle> Registry<H> {
    /// Removes the item tracked for `handle`, releasing the resource and
    /// firing callbacks. The entry is only removed if `still_due` accepts its
    /// current state, checked under the same lock that detaches it.
    ///
    /// The record is detached before any collaborator runs and is never put
    /// back, whatever the destroy primitive or the callbacks do.
    pub(crate) fn remove_entry<F>(&self, handle: &H, still_due: F) -> Option<Removal>
    where
        F: FnOnce(&TrackedItem<H>) -> bool,
    {
        let item = {
            let mut state = self.state.lock();
            if !state.items.get(handle).is_some_and(still_due) {
                return None;
            }
            state.items.remove(handle)?
        };

        let mut out = Removal::default();

        if self.gate.is_valid(handle) {
            let backend = self.gate.backend();
            if let Err(failure) = isolate(|| backend.destroy(handle)) {
                let e = ReaperError::DestroyFailed {
                    handle: format!("{:?}", handle),
                    reason: failure.to_string(),
                };
                error!(component = "registry", event = "destroy_failed", error = %e, "resource destroy failed");
                out.destroy_failed = true;
            }
        }

        if let Some(callback) = item.callback {
            if let Err(failure) = isolate(|| callback(handle)) {
                report_callback("item", failure);
                out.callback_failures += 1;
            }
        }

        if let Some(id) = item.group {
            let done = self.state.lock().groups.release(id);
            if let Some(Group {
                members,
                callback: Some(callback),
                ..
            }) = done
            {
                if let Err(failure) = isolate(|| callback(members.as_slice())) {
                    report_callback("group", failure);
                    out.callback_failures += 1;
                }
            }
        }

        Some(out)
    }
}

/// How a collaborator call went wrong.
#[derive(Debug)]
pub(crate) enum Failure {
    Error(anyhow::Error),
    Panic,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error(e) => write!(f, "{:#}", e),
            Self::Panic => write!(f, "panicked"),
        }
    }
}

/// Runs a collaborator, catching both returned errors and panics.
pub(crate) fn isolate<F>(f: F) -> Result<(), Failure>
where
    F: FnOnce() -> anyhow::Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(Failure::Error(e)),
        Err(_) => Err(Failure::Panic),
    }
}

fn report_callback(kind: &'static str, failure: Failure) {
    let e = match failure {
        Failure::Error(e) => ReaperError::CallbackFailed {
            kind,
            reason: format!("{:#}", e),
        },
        Failure::Panic => ReaperError::CallbackPanicked { kind },
    };
    error!(component = "registry", event = "callback_failed", kind, error = %e, "callback failed");
}
