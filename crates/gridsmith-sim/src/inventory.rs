//! Inventory controller: a participant's five slots, stock budget,
//! ghost preview and HUD, driving placement and removal.
//!
//! Slots, stock, selection, ghost and HUD are local to the controller.
//! Only the pooled handles it writes are shared, and every write is
//! preceded by a claim. Random slot refills are drawn here, once, by the
//! participant who owns the result; other participants only ever see the
//! drawn type ids, never the generator.

use glam::{Quat, Vec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use gridsmith_core::config::InventoryConfig;
use gridsmith_core::constants::SLOT_COUNT;
use gridsmith_core::error::{PoolError, ReplicationError};
use gridsmith_core::state::{GhostView, HudView, SlotView};
use gridsmith_core::types::{BlockId, BlockTypeId, ParticipantId, Pose, SlotIndex, Transform};

use crate::physics::WorldQuery;
use crate::pool::ObjectPool;
use crate::replication::{BlockHandle, Replication};
use crate::targeting::{is_placement_valid, placement_target};

/// One inventory position: a block type, or empty.
pub type Slot = Option<BlockTypeId>;

/// Result of a placement attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOutcome {
    Placed {
        handle: BlockHandle,
        block: BlockId,
        position: Vec3,
        /// The pool reused a handle that was still live elsewhere.
        recycled_live: bool,
    },
    /// Nothing selected.
    EmptySlot,
    /// Target cell is occupied.
    Occupied { target: Vec3 },
    PoolFailed(PoolError),
    ReplicationFailed(ReplicationError),
}

/// Result of a removal attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed { handle: BlockHandle, block: BlockId },
    /// Ray hit nothing within reach.
    Miss,
    /// Ray hit something that is not a removable block.
    NotBlock,
    ReplicationFailed(ReplicationError),
}

/// Claim `handle`, then write unit scale, identity rotation, `position`, and activate.
pub(crate) fn commit_placement<R: Replication + ?Sized>(
    replica: &mut R,
    handle: BlockHandle,
    participant: ParticipantId,
    position: Vec3,
) -> Result<BlockId, ReplicationError> {
    let block = replica
        .block_id(handle)
        .ok_or(ReplicationError::UnknownHandle)?;
    replica.claim(handle, participant);
    replica.set_transform(handle, participant, Transform::at(position))?;
    replica.set_active(handle, participant, true)?;
    Ok(block)
}

pub struct InventoryController {
    participant: ParticipantId,
    config: InventoryConfig,
    /// Number of block types slots may hold.
    type_count: usize,
    slots: [Slot; SLOT_COUNT],
    stock: u32,
    selected: SlotIndex,
    input_enabled: bool,
    ghost: GhostView,
    hud: HudView,
    rng: ChaCha8Rng,
}

impl InventoryController {
    /// Create a controller with input disabled and slots dealt from stock.
    pub fn new(
        participant: ParticipantId,
        config: InventoryConfig,
        pool: &ObjectPool,
        rng: ChaCha8Rng,
    ) -> Self {
        let mut controller = Self {
            participant,
            stock: config.total_stock,
            config,
            type_count: pool.type_count(),
            slots: [None; SLOT_COUNT],
            selected: SlotIndex::default(),
            input_enabled: false,
            ghost: GhostView::default(),
            hud: HudView::default(),
            rng,
        };
        controller.set_active(false);
        controller.set_random_inventory();
        controller.refresh_hud();
        controller
    }

    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    pub fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.slots
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn selected(&self) -> SlotIndex {
        self.selected
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn ghost(&self) -> &GhostView {
        &self.ghost
    }

    pub fn hud(&self) -> &HudView {
        &self.hud
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Turn input processing and the HUD on or off. Disabling also hides the ghost.
    pub fn set_active(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.hud.visible = enabled;
        if !enabled {
            self.ghost.visible = false;
        }
    }

    pub fn select_slot(&mut self, index: SlotIndex) {
        self.selected = index;
        self.refresh_hud();
    }

    /// Deal a random type into each slot while stock lasts; the rest stay empty.
    pub fn set_random_inventory(&mut self) {
        if self.type_count == 0 {
            return;
        }
        for i in 0..SLOT_COUNT {
            self.slots[i] = if self.stock > 0 {
                self.stock -= 1;
                Some(self.random_type())
            } else {
                None
            };
        }
        debug!(participant = %self.participant, stock = self.stock, "inventory dealt");
    }

    /// Snapped aim target for the current head pose.
    pub fn target<W: WorldQuery + ?Sized>(&self, world: &W, pose: &Pose) -> Vec3 {
        placement_target(
            world,
            pose,
            self.config.max_reach_distance,
            self.config.grid_size,
        )
    }

    /// Move the ghost to the current target. Does nothing while input is disabled.
    pub fn refresh_ghost<W: WorldQuery + ?Sized>(&mut self, world: &W, pose: &Pose) {
        if !self.input_enabled {
            return;
        }
        if self.slots[self.selected.get()].is_none() {
            self.ghost.visible = false;
            return;
        }

        let target = self.target(world, pose);
        self.ghost = GhostView {
            visible: true,
            position: target,
            rotation: Quat::IDENTITY,
            placeable: is_placement_valid(world, target, self.config.grid_size),
        };
    }

    /// Place the selected slot's block at the aim target, then refill the slot from stock.
    pub fn place_current_object<W>(
        &mut self,
        pool: &mut ObjectPool,
        world: &mut W,
        pose: &Pose,
    ) -> PlaceOutcome
    where
        W: WorldQuery + Replication,
    {
        let slot = self.selected.get();
        let Some(type_id) = self.slots[slot] else {
            return PlaceOutcome::EmptySlot;
        };

        let target = self.target(&*world, pose);
        if !is_placement_valid(&*world, target, self.config.grid_size) {
            trace!(participant = %self.participant, ?target, "placement target occupied");
            return PlaceOutcome::Occupied { target };
        }

        let acquired = match pool.acquire(type_id, world, self.participant) {
            Ok(acquired) => acquired,
            Err(e) => return PlaceOutcome::PoolFailed(e),
        };
        let block = match commit_placement(world, acquired.handle, self.participant, target) {
            Ok(block) => block,
            Err(e) => {
                warn!(participant = %self.participant, error = %e, "placement write rejected");
                return PlaceOutcome::ReplicationFailed(e);
            }
        };

        self.slots[slot] = None;
        if self.stock > 0 {
            self.stock -= 1;
            self.slots[slot] = Some(self.random_type());
        }
        self.refresh_hud();

        debug!(
            participant = %self.participant,
            ?block,
            position = ?target,
            stock = self.stock,
            "block placed"
        );
        PlaceOutcome::Placed {
            handle: acquired.handle,
            block,
            position: target,
            recycled_live: acquired.recycled_live,
        }
    }

    /// Deactivate the block under the aim ray, if it is on the block layer.
    pub fn remove_object<W>(&mut self, world: &mut W, pose: &Pose) -> RemoveOutcome
    where
        W: WorldQuery + Replication,
    {
        let Some(hit) = world.ray_query(
            pose.position,
            pose.forward(),
            self.config.max_reach_distance,
        ) else {
            return RemoveOutcome::Miss;
        };

        let handle = match hit.handle {
            Some(handle) if hit.layer == self.config.block_layer => handle,
            _ => return RemoveOutcome::NotBlock,
        };

        world.claim(handle, self.participant);
        if let Err(e) = world.set_active(handle, self.participant, false) {
            warn!(participant = %self.participant, error = %e, "removal write rejected");
            return RemoveOutcome::ReplicationFailed(e);
        }

        match world.block_id(handle) {
            Some(block) => {
                debug!(participant = %self.participant, ?block, "block removed");
                RemoveOutcome::Removed { handle, block }
            }
            None => RemoveOutcome::ReplicationFailed(ReplicationError::UnknownHandle),
        }
    }

    fn random_type(&mut self) -> BlockTypeId {
        BlockTypeId(self.rng.gen_range(0..self.type_count))
    }

    /// Recompute frame highlight, icon visibility and stock label.
    fn refresh_hud(&mut self) {
        for (index, view) in SlotIndex::all().zip(self.hud.slots.iter_mut()) {
            let contents = self.slots[index.get()];
            let highlighted = index == self.selected;
            *view = SlotView {
                contents,
                frame_color: if highlighted {
                    self.config.frame_selected_color
                } else {
                    self.config.frame_normal_color
                },
                highlighted,
                icon_visible: contents.is_some(),
            };
        }
        self.hud.selected = self.selected;
        self.hud.stock_label = format!("Stock: {}", self.stock);
    }
}
