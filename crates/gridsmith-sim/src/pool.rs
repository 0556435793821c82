//! Object pool: fixed sets of pre-created, initially inactive block handles,
//! one set per block type, handed out round-robin.
//!
//! Capacity is fixed when the pool is initialized and never grows. Each type
//! keeps its own cursor, which wraps after `capacity` issuances.
//!
//! The handles live in the shared world; the cursors do not. Every participant
//! gets its own clone of the pool and therefore its own cursors, all starting
//! at index 0 over the same handles. Reuse of a live handle is thus not limited
//! to one participant exceeding capacity: a second participant's first
//! placement of a type is handed the first participant's first block of that
//! type. The collision is arbitrated by the replication layer's
//! last-claim-wins rule, and `ReusePolicy` decides whether the pool reports it
//! (`Recycle`) or refuses it (`Strict`).

use tracing::{error, info, warn};

use gridsmith_core::config::BlockPrefab;
use gridsmith_core::enums::ReusePolicy;
use gridsmith_core::error::PoolError;
use gridsmith_core::types::{BlockId, BlockTypeId, ParticipantId};

use crate::replication::{BlockHandle, Replication};
use crate::world::BlockWorld;

/// A handle issued by the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquired {
    pub handle: BlockHandle,
    /// The handle was still active when issued and has been reset.
    pub recycled_live: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectPool {
    /// `handles[type][index]`
    handles: Vec<Vec<BlockHandle>>,
    cursors: Vec<usize>,
    capacity: usize,
    policy: ReusePolicy,
}

impl ObjectPool {
    /// A pool with no block types. Every acquire fails with `Unconfigured`.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Pre-create `capacity_per_type` inactive handles for each prefab.
    /// Leaves the pool unconfigured when there is nothing to create.
    pub fn initialize(
        world: &mut BlockWorld,
        prefabs: &[BlockPrefab],
        capacity_per_type: usize,
        policy: ReusePolicy,
    ) -> Self {
        if prefabs.is_empty() || capacity_per_type == 0 {
            warn!(
                types = prefabs.len(),
                capacity_per_type, "pool not initialized: nothing to create"
            );
            return Self::unconfigured();
        }

        let handles = prefabs
            .iter()
            .enumerate()
            .map(|(type_index, prefab)| {
                (0..capacity_per_type)
                    .map(|index| {
                        let id = BlockId {
                            type_id: BlockTypeId(type_index),
                            index,
                        };
                        world.spawn_block(id, prefab)
                    })
                    .collect()
            })
            .collect();

        info!(
            types = prefabs.len(),
            capacity_per_type,
            ?policy,
            "pools initialized"
        );

        Self {
            handles,
            cursors: vec![0; prefabs.len()],
            capacity: capacity_per_type,
            policy,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Number of block types, `T`.
    pub fn type_count(&self) -> usize {
        self.handles.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> ReusePolicy {
        self.policy
    }

    /// All handles of one type, in issue order.
    pub fn handles(&self, type_id: BlockTypeId) -> &[BlockHandle] {
        self.handles.get(type_id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Index of the next handle that `acquire(type_id)` will issue.
    pub fn cursor(&self, type_id: BlockTypeId) -> Option<usize> {
        self.cursors.get(type_id.0).copied()
    }

    /// Issue the handle at the cursor for `type_id` and advance the cursor.
    ///
    /// The issued handle is always inactive. If it was still live, the
    /// `Recycle` policy claims it for `participant`, deactivates it and flags
    /// the reuse; the `Strict` policy refuses without advancing the cursor.
    pub fn acquire<R: Replication>(
        &mut self,
        type_id: BlockTypeId,
        replica: &mut R,
        participant: ParticipantId,
    ) -> Result<Acquired, PoolError> {
        if !self.is_configured() {
            error!(?type_id, "invalid object id: pool not configured");
            return Err(PoolError::Unconfigured);
        }
        let Some(pool) = self.handles.get(type_id.0) else {
            error!(?type_id, types = self.type_count(), "invalid object id");
            return Err(PoolError::InvalidType(type_id));
        };

        let index = self.cursors[type_id.0];
        let handle = pool[index];
        let live = replica.is_active(handle);

        if live && self.policy == ReusePolicy::Strict {
            warn!(?type_id, index, "pool exhausted: next handle still active");
            return Err(PoolError::Exhausted(type_id));
        }

        self.cursors[type_id.0] = (index + 1) % self.capacity;

        if live {
            warn!(?type_id, index, %participant, "recycling a handle that is still active");
            replica.claim(handle, participant);
            if let Err(e) = replica.set_active(handle, participant, false) {
                warn!(error = %e, "failed to reset recycled handle");
            }
        }

        Ok(Acquired {
            handle,
            recycled_live: live,
        })
    }
}
