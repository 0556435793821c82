//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Session logic lives in the controllers and systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{BlockId, Layer, ParticipantId};

/// Marks an entity as a pre-allocated pool handle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PooledBlock {
    pub id: BlockId,
}

/// Replicated activation flag. Inactive entities are invisible and never collide.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Activation {
    pub active: bool,
}

/// Axis-aligned box collider, scaled by the entity's transform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoxCollider {
    /// Half size along each axis at unit scale.
    pub half_extents: Vec3,
    pub layer: Layer,
}

/// Current holder of write authority over a replicated entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Ownership {
    pub owner: Option<ParticipantId>,
}

/// Marks static level geometry (floor, walls). Never pooled, never owned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StaticGeometry;

// Transform is defined in types.rs and used directly as an ECS component.
