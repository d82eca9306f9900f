//! Callback types fired on removal.

/// Invoked once with the handle when its tracking record is removed.
pub type ItemCallback<H> = Box<dyn FnOnce(&H) -> anyhow::Result<()> + Send + 'static>;

/// Invoked once with the original member list when a group completes.
pub type GroupCallback<H> = Box<dyn FnOnce(&[H]) -> anyhow::Result<()> + Send + 'static>;

/// Boxes a closure as an item callback.
pub fn on_removed<H, F>(f: F) -> ItemCallback<H>
where
    F: FnOnce(&H) -> anyhow::Result<()> + Send + 'static,
{
    Box::new(f)
}

/// Boxes a closure as a group completion callback.
pub fn on_group_done<H, F>(f: F) -> GroupCallback<H>
where
    F: FnOnce(&[H]) -> anyhow::Result<()> + Send + 'static,
{
    Box::new(f)
}
