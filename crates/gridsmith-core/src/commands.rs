//! Participant commands sent to the session.
//!
//! Commands are queued per participant and processed at the next tick boundary.
//! Each one is a discrete, edge-triggered action.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::{InputKey, PlacementMode};
use crate::types::SlotIndex;

/// All possible participant actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Lobby ---
    /// Join the waiting round.
    JoinGame,
    /// Start the round (lobby owner only).
    StartGame,

    // --- Tracking ---
    /// Latest head pose from the participant's tracking.
    UpdateHeadPose { position: Vec3, rotation: Quat },

    // --- Raw input ---
    /// A key or button went down this frame.
    KeyDown { key: InputKey },

    // --- Inventory ---
    /// Select an inventory slot.
    SelectSlot { slot: SlotIndex },
    /// Place the selected slot's block at the aim target.
    PlaceObject,
    /// Remove the block under the aim ray.
    RemoveObject,
    /// Switch which placement path the place trigger drives.
    SetPlacementMode { mode: PlacementMode },

    // --- Direct placer ---
    /// Drop a type-0 block at the fixed distance ahead.
    PlaceDirect,

    // --- Flight ---
    /// Toggle free flight.
    SetFlying { enabled: bool },
    /// Movement axes for free flight.
    SetMoveInput {
        /// Strafe axis in [-1, 1].
        horizontal: f32,
        /// Forward axis in [-1, 1].
        vertical: f32,
        up: bool,
        down: bool,
        sprint: bool,
    },
}
