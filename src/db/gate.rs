//! Validation gate shared by every mutating operation.

use std::sync::Arc;
use std::time::Duration;

use crate::backend::ResourceBackend;
use crate::config::Ttl;
use crate::error::ReaperError;
use crate::model::Handle;

/// Gate checks handles against the backend and TTLs against the configured bounds.
pub struct Gate<H> {
    backend: Arc<dyn ResourceBackend<H>>,
    bounds: Ttl,
}

impl<H: Handle> Gate<H> {
    pub fn new(backend: Arc<dyn ResourceBackend<H>>, bounds: Ttl) -> Self {
        Self { backend, bounds }
    }

    pub fn backend(&self) -> &Arc<dyn ResourceBackend<H>> {
        &self.backend
    }

    pub fn bounds(&self) -> &Ttl {
        &self.bounds
    }

    /// Reports whether the handle still refers to a live, in-scope resource.
    pub fn is_valid(&self, handle: &H) -> bool {
        self.backend.is_valid(handle)
    }

    pub fn check_handle(&self, handle: &H) -> Result<(), ReaperError> {
        if self.backend.is_valid(handle) {
            Ok(())
        } else {
            Err(ReaperError::InvalidHandle(format!("{:?}", handle)))
        }
    }

    pub fn check_ttl(&self, ttl: Duration) -> Result<(), ReaperError> {
        if self.bounds.contains(ttl) {
            Ok(())
        } else {
            Err(ReaperError::TtlOutOfBounds {
                ttl,
                min: self.bounds.min,
                max: self.bounds.max,
            })
        }
    }

    pub fn check_tag(tag: &str) -> Result<(), ReaperError> {
        if tag.trim().is_empty() {
            Err(ReaperError::InvalidTag(tag.to_string()))
        } else {
            Ok(())
        }
    }
}
