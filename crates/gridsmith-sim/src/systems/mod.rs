//! Per-tick systems run by the session after commands are processed.
//!
//! Systems are plain functions over the participants and the world.
//! They do not own state.

pub mod flight;
pub mod ghost;
pub mod snapshot;
