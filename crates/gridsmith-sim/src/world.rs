//! The shared world: pooled blocks plus static level geometry in a hecs `World`.
//!
//! `BlockWorld` is the in-process stand-in for the replicated scene. It answers
//! geometry queries and enforces the claim-before-write rule on every mutation.
//! Each accepted claim or write is queued in an outbox of `ReplicationMessage`s,
//! which is what remote participants would receive.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::trace;

use gridsmith_core::components::*;
use gridsmith_core::config::{BlockPrefab, EnvironmentBox};
use gridsmith_core::error::ReplicationError;
use gridsmith_core::events::ReplicationMessage;
use gridsmith_core::state::BlockView;
use gridsmith_core::types::{BlockId, ParticipantId, Transform};

use crate::physics::{ray_aabb, sphere_intersects_aabb, RayHit, WorldQuery};
use crate::replication::{BlockHandle, Replication};

#[derive(Default)]
pub struct BlockWorld {
    world: World,
    outbox: Vec<ReplicationMessage>,
}

impl BlockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a static box to the level.
    pub fn spawn_environment(&mut self, env: &EnvironmentBox) -> Entity {
        self.world.spawn((
            StaticGeometry,
            Transform::at(env.center),
            BoxCollider {
                half_extents: env.half_extents,
                layer: env.layer,
            },
        ))
    }

    /// Pre-create one inactive, unowned block.
    pub fn spawn_block(&mut self, id: BlockId, prefab: &BlockPrefab) -> BlockHandle {
        BlockHandle(self.world.spawn((
            PooledBlock { id },
            Transform::default(),
            BoxCollider {
                half_extents: prefab.half_extents,
                layer: prefab.layer,
            },
            Activation { active: false },
            Ownership::default(),
        )))
    }

    /// Replication messages issued since the last drain.
    pub fn outbox(&self) -> &[ReplicationMessage] {
        &self.outbox
    }

    pub fn drain_outbox(&mut self) -> Vec<ReplicationMessage> {
        std::mem::take(&mut self.outbox)
    }

    /// All active blocks, ordered by block id.
    pub fn active_blocks(&self) -> Vec<BlockView> {
        let mut blocks: Vec<BlockView> = self
            .world
            .query::<(&PooledBlock, &Transform, &Activation, &Ownership)>()
            .iter()
            .filter(|(_, (_, _, activation, _))| activation.active)
            .map(|(_, (pooled, transform, _, ownership))| BlockView {
                block: pooled.id,
                position: transform.position,
                rotation: transform.rotation,
                scale: transform.scale,
                owner: ownership.owner,
            })
            .collect();
        blocks.sort_by_key(|b| b.block);
        blocks
    }

    fn check_owner(
        &self,
        handle: BlockHandle,
        participant: ParticipantId,
    ) -> Result<BlockId, ReplicationError> {
        let block = self
            .block_id(handle)
            .ok_or(ReplicationError::UnknownHandle)?;
        match self.owner_of(handle) {
            Some(owner) if owner == participant => Ok(block),
            _ => Err(ReplicationError::NotOwner { block, participant }),
        }
    }
}

/// World-space bounds of a scaled box collider.
fn bounds(transform: &Transform, collider: &BoxCollider) -> (Vec3, Vec3) {
    let half = collider.half_extents * transform.scale.abs();
    (transform.position - half, transform.position + half)
}

impl WorldQuery for BlockWorld {
    fn ray_query(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut best: Option<RayHit> = None;
        let mut query = self.world.query::<(
            &Transform,
            &BoxCollider,
            Option<&Activation>,
            Option<&PooledBlock>,
        )>();
        for (entity, (transform, collider, activation, pooled)) in query.iter() {
            if activation.is_some_and(|a| !a.active) {
                continue;
            }
            let (min, max) = bounds(transform, collider);
            let Some((distance, normal)) = ray_aabb(origin, direction, min, max) else {
                continue;
            };
            if distance > max_distance || best.is_some_and(|b| b.distance <= distance) {
                continue;
            }
            best = Some(RayHit {
                point: origin + direction * distance,
                normal,
                distance,
                layer: collider.layer,
                handle: pooled.map(|_| BlockHandle(entity)),
            });
        }
        best
    }

    fn overlap_count(&self, center: Vec3, radius: f32) -> usize {
        self.world
            .query::<(&Transform, &BoxCollider, Option<&Activation>)>()
            .iter()
            .filter(|(_, (_, _, activation))| activation.map_or(true, |a| a.active))
            .filter(|(_, (transform, collider, _))| {
                let (min, max) = bounds(transform, collider);
                sphere_intersects_aabb(center, radius, min, max)
            })
            .count()
    }
}

impl Replication for BlockWorld {
    fn claim(&mut self, handle: BlockHandle, participant: ParticipantId) {
        let Some(block) = self.block_id(handle) else {
            trace!(%participant, "claim on non-replicated entity ignored");
            return;
        };
        if let Ok(mut ownership) = self.world.get::<&mut Ownership>(handle.0) {
            ownership.owner = Some(participant);
        }
        self.outbox.push(ReplicationMessage::Claim { block, participant });
    }

    fn owner_of(&self, handle: BlockHandle) -> Option<ParticipantId> {
        self.world
            .get::<&Ownership>(handle.0)
            .ok()
            .and_then(|o| o.owner)
    }

    fn block_id(&self, handle: BlockHandle) -> Option<BlockId> {
        self.world.get::<&PooledBlock>(handle.0).ok().map(|p| p.id)
    }

    fn is_active(&self, handle: BlockHandle) -> bool {
        self.world
            .get::<&Activation>(handle.0)
            .is_ok_and(|a| a.active)
    }

    fn transform_of(&self, handle: BlockHandle) -> Option<Transform> {
        self.world.get::<&Transform>(handle.0).ok().map(|t| *t)
    }

    fn set_active(
        &mut self,
        handle: BlockHandle,
        participant: ParticipantId,
        active: bool,
    ) -> Result<(), ReplicationError> {
        let block = self.check_owner(handle, participant)?;
        {
            let mut activation = self
                .world
                .get::<&mut Activation>(handle.0)
                .map_err(|_| ReplicationError::UnknownHandle)?;
            activation.active = active;
        }
        self.outbox
            .push(ReplicationMessage::Activation { block, active });
        Ok(())
    }

    fn set_transform(
        &mut self,
        handle: BlockHandle,
        participant: ParticipantId,
        transform: Transform,
    ) -> Result<(), ReplicationError> {
        let block = self.check_owner(handle, participant)?;
        {
            let mut current = self
                .world
                .get::<&mut Transform>(handle.0)
                .map_err(|_| ReplicationError::UnknownHandle)?;
            *current = transform;
        }
        self.outbox.push(ReplicationMessage::Transform {
            block,
            position: transform.position,
            rotation: transform.rotation,
            scale: transform.scale,
        });
        Ok(())
    }
}
