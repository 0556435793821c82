//! Events emitted by the session for UI feedback and diagnostics,
//! and the replication messages other participants would receive.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::RejectReason;
use crate::types::{BlockId, ParticipantId};

/// Things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A participant joined the waiting round.
    PlayerJoined { participant: ParticipantId },
    /// A round started with the given parent.
    RoundStarted { parent: ParticipantId },
    /// A block went live in the shared world.
    BlockPlaced {
        participant: ParticipantId,
        block: BlockId,
        position: Vec3,
    },
    /// A block was deactivated.
    BlockRemoved {
        participant: ParticipantId,
        block: BlockId,
    },
    /// A placement attempt had no visible effect.
    PlacementRejected {
        participant: ParticipantId,
        reason: RejectReason,
    },
    /// The pool handed out a handle that was still active.
    HandleRecycled {
        participant: ParticipantId,
        block: BlockId,
    },
    /// A lobby action was refused.
    LobbyRejected {
        participant: ParticipantId,
        reason: String,
    },
}

/// Replicated mutations, in the order they were issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReplicationMessage {
    /// Write authority over `block` moves to `participant`.
    Claim {
        block: BlockId,
        participant: ParticipantId,
    },
    /// New transform for `block`.
    Transform {
        block: BlockId,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    },
    /// New activation state for `block`.
    Activation { block: BlockId, active: bool },
}
