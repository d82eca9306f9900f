// Shared test support code.
// This module provides fakes for the collaborators and a ready-made registry.

pub mod backend;
pub mod harness;
pub mod reaper;
pub mod recorder;

pub use backend::{FakeBackend, FakeTags};
pub use harness::Harness;
pub use reaper::{settle, ReaperHarness};
pub use recorder::Recorder;
