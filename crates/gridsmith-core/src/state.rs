//! Session snapshot: the complete visible state produced after each tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::SLOT_COUNT;
use crate::enums::{GamePhase, PlacementMode, Role};
use crate::events::{ReplicationMessage, SessionEvent};
use crate::types::{BlockId, BlockTypeId, ParticipantId, Pose, SimTime, SlotIndex};

/// Complete session state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub lobby: LobbyView,
    /// Active blocks in the shared world.
    pub blocks: Vec<BlockView>,
    pub participants: Vec<ParticipantView>,
    pub events: Vec<SessionEvent>,
    /// Replication messages issued during this tick.
    pub replication: Vec<ReplicationMessage>,
}

/// A placed block as every participant sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockView {
    pub block: BlockId,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub owner: Option<ParticipantId>,
}

/// Per-participant state. HUD and ghost are local to that participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantView {
    pub participant: ParticipantId,
    pub display_name: String,
    pub pose: Pose,
    pub flying: bool,
    pub mode: PlacementMode,
    /// Role is only meaningful to its holder once a round starts.
    pub role: Option<Role>,
    pub input_enabled: bool,
    pub stock: u32,
    pub hud: HudView,
    pub ghost: GhostView,
}

/// Inventory HUD: slot frames, icons and stock label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub visible: bool,
    pub selected: SlotIndex,
    pub slots: [SlotView; SLOT_COUNT],
    pub stock_label: String,
}

impl Default for HudView {
    fn default() -> Self {
        Self {
            visible: false,
            selected: SlotIndex::default(),
            slots: [SlotView::default(); SLOT_COUNT],
            stock_label: String::new(),
        }
    }
}

/// One slot frame on the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub contents: Option<BlockTypeId>,
    pub frame_color: [f32; 4],
    pub highlighted: bool,
    pub icon_visible: bool,
}

/// Local, non-replicated placement preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostView {
    pub visible: bool,
    pub position: Vec3,
    pub rotation: Quat,
    /// Whether a placement at this point would pass the overlap check. Informational only.
    pub placeable: bool,
}

impl Default for GhostView {
    fn default() -> Self {
        Self {
            visible: false,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            placeable: false,
        }
    }
}

/// Lobby board state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LobbyView {
    pub phase: GamePhase,
    pub status: String,
    /// Join/start buttons are only shown before the round starts.
    pub lobby_ui_visible: bool,
    pub joined: Vec<ParticipantId>,
    pub current_parent: Option<ParticipantId>,
}
