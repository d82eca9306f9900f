//! End-to-end cases for the reaper.
//!
//! These run the registry through the lifecycle controller, the heartbeat and
//! the background tasks with fake collaborators.

mod cases_group_test;

pub mod support;
