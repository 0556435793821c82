//! Ownership and replication boundary.
//!
//! Shared handles are mutated only through this trait. `claim` is
//! fire-and-forget: nothing here awaits acknowledgement, retries, or
//! notices that someone else claimed the same handle in the same tick.
//! Concurrent claims resolve as last-claim-wins in whatever layer
//! implements the trait.

use gridsmith_core::error::ReplicationError;
use gridsmith_core::types::{BlockId, ParticipantId, Transform};

/// Opaque reference to one pooled, replicated block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle(pub(crate) hecs::Entity);

pub trait Replication {
    /// Make `participant` the holder of write authority over `handle`.
    fn claim(&mut self, handle: BlockHandle, participant: ParticipantId);

    fn owner_of(&self, handle: BlockHandle) -> Option<ParticipantId>;

    fn block_id(&self, handle: BlockHandle) -> Option<BlockId>;

    fn is_active(&self, handle: BlockHandle) -> bool;

    fn transform_of(&self, handle: BlockHandle) -> Option<Transform>;

    /// Fails with `NotOwner` unless `participant` holds the token.
    fn set_active(
        &mut self,
        handle: BlockHandle,
        participant: ParticipantId,
        active: bool,
    ) -> Result<(), ReplicationError>;

    /// Fails with `NotOwner` unless `participant` holds the token.
    fn set_transform(
        &mut self,
        handle: BlockHandle,
        participant: ParticipantId,
        transform: Transform,
    ) -> Result<(), ReplicationError>;
}
