//! Lobby and role gate for gridsmith.
//!
//! Tracks who joined the round, draws roles and the round's parent,
//! and decides which participant may use their inventory.
//! No ECS dependency; operates on plain data.

pub mod fsm;

pub use fsm::Lobby;
pub use gridsmith_core as core;

#[cfg(test)]
mod tests;
