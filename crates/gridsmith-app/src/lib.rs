//! Gridsmith headless runner.
//!
//! Hosts a session on a fixed-rate game-loop thread and exposes it through
//! `AppState`: connect participants, forward their commands, poll snapshots.

pub mod game_loop;
pub mod state;

pub use gridsmith_core as core;
