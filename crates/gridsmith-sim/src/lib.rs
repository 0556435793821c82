//! Session engine for gridsmith.
//!
//! Owns the shared hecs world of pooled blocks, applies participant commands
//! at tick boundaries, and produces `SessionSnapshot`s. Completely headless,
//! which keeps every placement rule testable by direct calls.

pub mod engine;
pub mod input;
pub mod inventory;
pub mod participant;
pub mod physics;
pub mod placer;
pub mod pool;
pub mod replication;
pub mod systems;
pub mod targeting;
pub mod world;
pub mod world_setup;

pub use engine::Session;
pub use gridsmith_core as core;
