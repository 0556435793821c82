//! Direct placer: drops a type-0 block a fixed distance ahead of the head.
//! No slots, no stock, no surface adjustment and no overlap check.

use tracing::{debug, warn};

use gridsmith_core::config::PlacerConfig;
use gridsmith_core::types::{BlockTypeId, ParticipantId, Pose};

use crate::inventory::{commit_placement, PlaceOutcome};
use crate::pool::ObjectPool;
use crate::replication::Replication;
use crate::targeting::ahead_target;

/// Block type the direct placer always uses.
pub const DIRECT_BLOCK_TYPE: BlockTypeId = BlockTypeId(0);

pub struct DirectPlacer {
    participant: ParticipantId,
    config: PlacerConfig,
}

impl DirectPlacer {
    pub fn new(participant: ParticipantId, config: PlacerConfig) -> Self {
        Self {
            participant,
            config,
        }
    }

    pub fn config(&self) -> &PlacerConfig {
        &self.config
    }

    pub fn place_block<R: Replication>(
        &self,
        pool: &mut ObjectPool,
        replica: &mut R,
        pose: &Pose,
    ) -> PlaceOutcome {
        let position = ahead_target(pose, self.config.placement_distance, self.config.grid_size);

        let acquired = match pool.acquire(DIRECT_BLOCK_TYPE, replica, self.participant) {
            Ok(acquired) => acquired,
            Err(e) => return PlaceOutcome::PoolFailed(e),
        };
        match commit_placement(replica, acquired.handle, self.participant, position) {
            Ok(block) => {
                debug!(participant = %self.participant, ?block, ?position, "block placed directly");
                PlaceOutcome::Placed {
                    handle: acquired.handle,
                    block,
                    position,
                    recycled_live: acquired.recycled_live,
                }
            }
            Err(e) => {
                warn!(participant = %self.participant, error = %e, "direct placement write rejected");
                PlaceOutcome::ReplicationFailed(e)
            }
        }
    }
}
