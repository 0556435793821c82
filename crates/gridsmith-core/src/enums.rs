//! Enumeration types used throughout the session.

use serde::{Deserialize, Serialize};

use crate::types::SlotIndex;

/// Round phase as seen by the lobby gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Participants are joining; nobody may place from the inventory.
    #[default]
    Waiting,
    /// A round is running with a designated parent.
    InRound,
}

/// Secret role drawn at round start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Villager,
    Werewolf,
}

/// Which placement path the place trigger drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementMode {
    /// Slot-and-stock inventory with ghost preview.
    #[default]
    Inventory,
    /// Fixed-distance, type-0 placement without slots.
    Direct,
}

/// What the pool does when the next handle in the cycle is still active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReusePolicy {
    /// Hand the live handle out anyway (reset to inactive) and report it.
    #[default]
    Recycle,
    /// Refuse with `PoolError::Exhausted`.
    Strict,
}

/// Physical keys and buttons the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKey {
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    E,
    R,
    MouseLeft,
    MouseRight,
}

/// Discrete action produced by an input edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    SelectSlot(SlotIndex),
    Place,
    Remove,
}

/// Why a placement attempt produced no block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Selected slot holds nothing.
    EmptySlot,
    /// Something already occupies the target cell.
    Occupied,
    /// The pool could not hand out a handle.
    PoolUnavailable,
    /// The replicated write was refused, e.g. the handle was claimed away.
    WriteRejected,
}
