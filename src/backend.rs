// Collaborator interfaces the registry consumes.

/// ResourceBackend owns the resources behind the handles.
pub trait ResourceBackend<H>: Send + Sync {
    /// Reports whether the resource still exists and is in scope.
    fn is_valid(&self, handle: &H) -> bool;

    /// Releases the resource. Best effort: a failure never keeps a tracking
    /// record alive.
    fn destroy(&self, handle: &H) -> anyhow::Result<()>;
}

/// TagIndex resolves a classification tag to the handles carrying it.
pub trait TagIndex<H>: Send + Sync {
    /// Returns every handle currently carrying `tag`.
    fn query_by_tag(&self, tag: &str) -> Vec<H>;
}

/// Tag index for hosts without classification tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTags;

impl<H> TagIndex<H> for NoTags {
    fn query_by_tag(&self, _tag: &str) -> Vec<H> {
        Vec::new()
    }
}
