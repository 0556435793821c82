//! Everything the session keeps for one connected participant.

use gridsmith_core::enums::PlacementMode;
use gridsmith_core::types::{ParticipantId, Pose};

use crate::inventory::InventoryController;
use crate::placer::DirectPlacer;
use crate::pool::ObjectPool;
use crate::systems::flight::FlightState;

pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    /// Head pose, refreshed by tracking updates and flight.
    pub pose: Pose,
    pub flight: FlightState,
    pub mode: PlacementMode,
    /// This participant's cursors over the shared handles.
    /// Shared by the inventory and the direct placer.
    pub pool: ObjectPool,
    pub inventory: InventoryController,
    pub placer: DirectPlacer,
}
