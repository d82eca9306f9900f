// Error definitions for the registry and its collaborators.

use std::time::Duration;

/// Errors returned by registry operations, plus the failures that are only
/// ever reported (logged) and never propagated to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReaperError {
    #[error("reaper is destroyed")]
    Destroyed,

    #[error("handle {0} is not a live resource")]
    InvalidHandle(String),

    #[error("ttl {ttl:?} is out of bounds [{min:?}, {max:?}]")]
    TtlOutOfBounds {
        ttl: Duration,
        min: Duration,
        max: Duration,
    },

    #[error("invalid tag {0:?}")]
    InvalidTag(String),

    #[error("failed to destroy {handle}: {reason}")]
    DestroyFailed { handle: String, reason: String },

    #[error("{kind} callback failed: {reason}")]
    CallbackFailed { kind: &'static str, reason: String },

    #[error("{kind} callback panicked")]
    CallbackPanicked { kind: &'static str },
}

impl ReaperError {
    /// Reports whether the error rejects an argument (as opposed to a torn down registry).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidHandle(_) | Self::TtlOutOfBounds { .. } | Self::InvalidTag(_)
        )
    }
}
