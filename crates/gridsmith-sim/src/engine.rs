//! Session engine: the core of the game.
//!
//! `Session` owns the shared world, the lobby and every participant's local
//! state. Commands are queued per participant and applied at the next tick
//! boundary as discrete, edge-triggered actions; the ghost preview is the only
//! periodic work and runs at a bounded rate. Completely headless, enabling
//! deterministic testing.

use std::collections::{BTreeMap, VecDeque};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use gridsmith_core::commands::PlayerCommand;
use gridsmith_core::config::SessionConfig;
use gridsmith_core::enums::{InputAction, PlacementMode, RejectReason};
use gridsmith_core::events::SessionEvent;
use gridsmith_core::state::SessionSnapshot;
use gridsmith_core::types::{ParticipantId, Pose, SimTime};
use gridsmith_lobby::Lobby;

use crate::input;
use crate::inventory::{InventoryController, PlaceOutcome, RemoveOutcome};
use crate::participant::Participant;
use crate::placer::DirectPlacer;
use crate::pool::ObjectPool;
use crate::systems;
use crate::systems::flight::{FlightState, MoveInput};
use crate::world::BlockWorld;
use crate::world_setup;

/// The session engine. Owns the shared world and all participant state.
pub struct Session {
    config: SessionConfig,
    world: BlockWorld,
    /// Freshly initialized pool; each participant clones it for their own cursors.
    pool_template: ObjectPool,
    lobby: Lobby,
    participants: BTreeMap<ParticipantId, Participant>,
    next_participant: u32,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<(ParticipantId, PlayerCommand)>,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a new session with the given config.
    pub fn new(config: SessionConfig) -> Self {
        let (world, pool_template) = world_setup::setup_world(&config);
        info!(seed = config.seed, "session created");
        Self {
            lobby: Lobby::new(config.lobby.clone()),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world,
            pool_template,
            participants: BTreeMap::new(),
            next_participant: 0,
            time: SimTime::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Connect a participant. Their inventory is dealt immediately but stays
    /// disabled until the lobby gate opens it.
    pub fn add_participant(&mut self, display_name: &str) -> ParticipantId {
        let id = ParticipantId(self.next_participant);
        self.next_participant += 1;

        let pool = self.pool_template.clone();
        let inventory_rng = ChaCha8Rng::seed_from_u64(self.rng.gen());
        let mut inventory =
            InventoryController::new(id, self.config.inventory.clone(), &pool, inventory_rng);
        inventory.set_active(self.lobby.inventory_enabled(id));

        let participant = Participant {
            id,
            display_name: display_name.to_string(),
            pose: Pose::new(self.config.spawn_position, glam::Quat::IDENTITY),
            flight: FlightState {
                flying: self.config.flight.enabled_on_join,
                ..Default::default()
            },
            mode: self.config.default_mode,
            pool,
            inventory,
            placer: DirectPlacer::new(id, self.config.placer.clone()),
        };
        self.participants.insert(id, participant);
        info!(participant = %id, name = display_name, "participant connected");
        id
    }

    /// Disconnect a participant. Blocks they placed stay in the world.
    pub fn remove_participant(&mut self, id: ParticipantId) {
        if self.participants.remove(&id).is_some() {
            self.lobby.leave(id);
            self.command_queue.retain(|(p, _)| *p != id);
            info!(participant = %id, "participant disconnected");
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, participant: ParticipantId, command: PlayerCommand) {
        self.command_queue.push_back((participant, command));
    }

    /// Queue multiple commands from one participant.
    pub fn queue_commands(
        &mut self,
        participant: ParticipantId,
        commands: impl IntoIterator<Item = PlayerCommand>,
    ) {
        self.command_queue
            .extend(commands.into_iter().map(|c| (participant, c)));
    }

    /// Advance the session by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SessionSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        let replication = self.world.drain_outbox();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.lobby,
            &self.participants,
            events,
            replication,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only access to the shared world.
    pub fn world(&self) -> &BlockWorld {
        &self.world
    }

    pub fn lobby(&self) -> &Lobby {
        &self.lobby
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    /// Mutable participant access (for tests that set up state directly).
    #[cfg(test)]
    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.get_mut(&id)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some((participant, command)) = self.command_queue.pop_front() {
            self.handle_command(participant, command);
        }
    }

    /// Handle a single participant command.
    fn handle_command(&mut self, id: ParticipantId, command: PlayerCommand) {
        if !self.participants.contains_key(&id) {
            debug!(participant = %id, "command from unknown participant dropped");
            return;
        }

        match command {
            PlayerCommand::JoinGame => match self.lobby.join(id) {
                Ok(()) => {
                    self.events.push(SessionEvent::PlayerJoined { participant: id });
                    self.apply_gate();
                }
                Err(e) => self.reject_lobby(id, e.to_string()),
            },
            PlayerCommand::StartGame => match self.lobby.start(id, &mut self.rng) {
                Ok(()) => {
                    if let Some(parent) = self.lobby.current_parent() {
                        self.events.push(SessionEvent::RoundStarted { parent });
                    }
                    self.apply_gate();
                }
                Err(e) => self.reject_lobby(id, e.to_string()),
            },
            PlayerCommand::UpdateHeadPose { position, rotation } => {
                if let Some(p) = self.participants.get_mut(&id) {
                    p.pose = Pose::new(position, rotation);
                }
            }
            PlayerCommand::KeyDown { key } => {
                if let Some(action) = input::map_key(key) {
                    self.dispatch_action(id, action);
                }
            }
            PlayerCommand::SelectSlot { slot } => {
                self.dispatch_action(id, InputAction::SelectSlot(slot));
            }
            PlayerCommand::PlaceObject => self.dispatch_action(id, InputAction::Place),
            PlayerCommand::RemoveObject => self.dispatch_action(id, InputAction::Remove),
            PlayerCommand::SetPlacementMode { mode } => {
                if let Some(p) = self.participants.get_mut(&id) {
                    p.mode = mode;
                }
            }
            PlayerCommand::PlaceDirect => self.place_direct(id),
            PlayerCommand::SetFlying { enabled } => {
                if let Some(p) = self.participants.get_mut(&id) {
                    p.flight.flying = enabled;
                    if !enabled {
                        p.flight.velocity = glam::Vec3::ZERO;
                    }
                }
            }
            PlayerCommand::SetMoveInput {
                horizontal,
                vertical,
                up,
                down,
                sprint,
            } => {
                if let Some(p) = self.participants.get_mut(&id) {
                    p.flight.input = MoveInput {
                        horizontal,
                        vertical,
                        up,
                        down,
                        sprint,
                    };
                }
            }
        }
    }

    /// Route an input action. Inventory actions only run while the gate has
    /// enabled input; the direct placer ignores the gate.
    fn dispatch_action(&mut self, id: ParticipantId, action: InputAction) {
        let Some(p) = self.participants.get_mut(&id) else {
            return;
        };

        if action == InputAction::Place && p.mode == PlacementMode::Direct {
            self.place_direct(id);
            return;
        }
        if !p.inventory.is_input_enabled() {
            debug!(participant = %id, ?action, "input ignored: inventory disabled");
            return;
        }

        match action {
            InputAction::SelectSlot(slot) => p.inventory.select_slot(slot),
            InputAction::Place => {
                let outcome = p
                    .inventory
                    .place_current_object(&mut p.pool, &mut self.world, &p.pose);
                record_place(&mut self.events, id, outcome);
            }
            InputAction::Remove => {
                let outcome = p.inventory.remove_object(&mut self.world, &p.pose);
                if let RemoveOutcome::Removed { block, .. } = outcome {
                    self.events.push(SessionEvent::BlockRemoved {
                        participant: id,
                        block,
                    });
                }
            }
        }
    }

    fn place_direct(&mut self, id: ParticipantId) {
        let Some(p) = self.participants.get_mut(&id) else {
            return;
        };
        let outcome = p.placer.place_block(&mut p.pool, &mut self.world, &p.pose);
        record_place(&mut self.events, id, outcome);
    }

    /// Enable the inventory of whoever the lobby allows, disable everyone else.
    fn apply_gate(&mut self) {
        for (id, p) in self.participants.iter_mut() {
            p.inventory.set_active(self.lobby.inventory_enabled(*id));
        }
    }

    fn reject_lobby(&mut self, id: ParticipantId, reason: String) {
        info!(participant = %id, %reason, "lobby action rejected");
        self.events.push(SessionEvent::LobbyRejected {
            participant: id,
            reason,
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Free flight
        systems::flight::run(self.participants.values_mut(), &self.config.flight);
        // 2. Ghost preview, at a bounded rate
        let interval = u64::from(self.config.ghost_refresh_interval_ticks.max(1));
        if self.time.tick % interval == 0 {
            systems::ghost::run(self.participants.values_mut(), &self.world);
        }
    }
}

/// Translate a placement outcome into session events.
fn record_place(events: &mut Vec<SessionEvent>, participant: ParticipantId, outcome: PlaceOutcome) {
    match outcome {
        PlaceOutcome::Placed {
            block,
            position,
            recycled_live,
            ..
        } => {
            if recycled_live {
                events.push(SessionEvent::HandleRecycled { participant, block });
            }
            events.push(SessionEvent::BlockPlaced {
                participant,
                block,
                position,
            });
        }
        PlaceOutcome::EmptySlot => events.push(SessionEvent::PlacementRejected {
            participant,
            reason: RejectReason::EmptySlot,
        }),
        PlaceOutcome::Occupied { .. } => events.push(SessionEvent::PlacementRejected {
            participant,
            reason: RejectReason::Occupied,
        }),
        PlaceOutcome::PoolFailed(_) => events.push(SessionEvent::PlacementRejected {
            participant,
            reason: RejectReason::PoolUnavailable,
        }),
        PlaceOutcome::ReplicationFailed(_) => events.push(SessionEvent::PlacementRejected {
            participant,
            reason: RejectReason::WriteRejected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsmith_core::error::{PoolError, ReplicationError};

    const P: ParticipantId = ParticipantId(3);

    fn rejection(outcome: PlaceOutcome) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        record_place(&mut events, P, outcome);
        events
    }

    #[test]
    fn test_pool_failures_are_pool_unavailable() {
        for error in [
            PoolError::Unconfigured,
            PoolError::InvalidType(gridsmith_core::types::BlockTypeId(7)),
            PoolError::Exhausted(gridsmith_core::types::BlockTypeId(0)),
        ] {
            assert_eq!(
                rejection(PlaceOutcome::PoolFailed(error)),
                vec![SessionEvent::PlacementRejected {
                    participant: P,
                    reason: RejectReason::PoolUnavailable
                }]
            );
        }
    }

    #[test]
    fn test_refused_write_is_write_rejected() {
        assert_eq!(
            rejection(PlaceOutcome::ReplicationFailed(ReplicationError::UnknownHandle)),
            vec![SessionEvent::PlacementRejected {
                participant: P,
                reason: RejectReason::WriteRejected
            }]
        );
    }
}
