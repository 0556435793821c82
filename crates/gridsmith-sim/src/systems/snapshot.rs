//! Snapshot builder: assembles a `SessionSnapshot` from the world,
//! the lobby and every participant's local state.

use std::collections::BTreeMap;

use gridsmith_core::events::{ReplicationMessage, SessionEvent};
use gridsmith_core::state::{ParticipantView, SessionSnapshot};
use gridsmith_core::types::{ParticipantId, SimTime};
use gridsmith_lobby::Lobby;

use crate::participant::Participant;
use crate::world::BlockWorld;

/// Build a complete snapshot of the session.
pub fn build_snapshot(
    world: &BlockWorld,
    time: &SimTime,
    lobby: &Lobby,
    participants: &BTreeMap<ParticipantId, Participant>,
    events: Vec<SessionEvent>,
    replication: Vec<ReplicationMessage>,
) -> SessionSnapshot {
    let lobby_view = lobby.view(|id| participants.get(&id).map(|p| p.display_name.clone()));

    let participants = participants
        .values()
        .map(|p| ParticipantView {
            participant: p.id,
            display_name: p.display_name.clone(),
            pose: p.pose,
            flying: p.flight.flying,
            mode: p.mode,
            role: lobby.role_of(p.id),
            input_enabled: p.inventory.is_input_enabled(),
            stock: p.inventory.stock(),
            hud: p.inventory.hud().clone(),
            ghost: *p.inventory.ghost(),
        })
        .collect();

    SessionSnapshot {
        time: *time,
        lobby: lobby_view,
        blocks: world.active_blocks(),
        participants,
        events,
        replication,
    }
}
