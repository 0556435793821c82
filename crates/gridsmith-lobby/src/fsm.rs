//! Lobby state machine: Waiting -> InRound.
//!
//! Whoever last joined holds write authority over the lobby (the same
//! claim-then-write rule blocks follow) and is the only one allowed to
//! start the round. Role and parent draws happen once, on that
//! authority, and the drawn results are what everyone else sees.

use rand::seq::index::sample;
use rand::Rng;
use tracing::{debug, info};

use gridsmith_core::config::LobbyConfig;
use gridsmith_core::enums::{GamePhase, Role};
use gridsmith_core::error::LobbyError;
use gridsmith_core::state::LobbyView;
use gridsmith_core::types::ParticipantId;

#[derive(Debug, Clone)]
pub struct Lobby {
    config: LobbyConfig,
    players: Vec<ParticipantId>,
    /// Parallel to `players`.
    roles: Vec<Role>,
    current_parent: Option<ParticipantId>,
    started: bool,
    owner: Option<ParticipantId>,
}

impl Lobby {
    pub fn new(config: LobbyConfig) -> Self {
        Self {
            config,
            players: Vec::new(),
            roles: Vec::new(),
            current_parent: None,
            started: false,
            owner: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.started {
            GamePhase::InRound
        } else {
            GamePhase::Waiting
        }
    }

    pub fn players(&self) -> &[ParticipantId] {
        &self.players
    }

    pub fn owner(&self) -> Option<ParticipantId> {
        self.owner
    }

    pub fn current_parent(&self) -> Option<ParticipantId> {
        self.current_parent
    }

    pub fn is_joined(&self, participant: ParticipantId) -> bool {
        self.players.contains(&participant)
    }

    /// Role drawn for `participant`, once the round has started.
    pub fn role_of(&self, participant: ParticipantId) -> Option<Role> {
        if !self.started {
            return None;
        }
        self.players
            .iter()
            .position(|&p| p == participant)
            .map(|i| self.roles[i])
    }

    /// Add `participant` to the waiting round. The joiner takes over the lobby.
    pub fn join(&mut self, participant: ParticipantId) -> Result<(), LobbyError> {
        if self.started {
            return Err(LobbyError::AlreadyStarted);
        }
        if self.is_joined(participant) {
            return Err(LobbyError::AlreadyJoined(participant));
        }
        if self.players.len() >= self.config.max_players {
            return Err(LobbyError::Full(self.config.max_players));
        }

        self.owner = Some(participant);
        self.players.push(participant);
        self.roles.push(Role::Villager);
        info!(%participant, joined = self.players.len(), "player joined");
        Ok(())
    }

    /// Start the round: draw werewolves and the parent.
    pub fn start(&mut self, requester: ParticipantId, rng: &mut impl Rng) -> Result<(), LobbyError> {
        if self.owner != Some(requester) {
            return Err(LobbyError::NotOwner(requester));
        }
        if self.started {
            return Err(LobbyError::AlreadyStarted);
        }
        let joined = self.players.len();
        if joined < self.config.min_players.max(1) {
            return Err(LobbyError::NotEnoughPlayers {
                joined,
                required: self.config.min_players.max(1),
            });
        }

        self.roles.iter_mut().for_each(|r| *r = Role::Villager);
        let werewolves = self.config.werewolf_count.min(joined);
        for i in sample(rng, joined, werewolves) {
            self.roles[i] = Role::Werewolf;
        }

        let parent = self.players[rng.gen_range(0..joined)];
        self.current_parent = Some(parent);
        self.started = true;
        info!(%parent, players = joined, werewolves, "round started");
        Ok(())
    }

    /// Drop a participant who left the instance.
    pub fn leave(&mut self, participant: ParticipantId) {
        if let Some(i) = self.players.iter().position(|&p| p == participant) {
            self.players.remove(i);
            self.roles.remove(i);
            if self.owner == Some(participant) {
                self.owner = self.players.last().copied();
            }
            debug!(%participant, "player left lobby");
        }
    }

    /// Whether `participant` may currently use the inventory.
    pub fn inventory_enabled(&self, participant: ParticipantId) -> bool {
        self.started && self.current_parent == Some(participant)
    }

    /// Board state. `name_of` resolves the parent's display name; a parent who
    /// left the instance shows as "Unknown".
    pub fn view(&self, name_of: impl Fn(ParticipantId) -> Option<String>) -> LobbyView {
        let status = if self.started {
            let name = self
                .current_parent
                .and_then(&name_of)
                .unwrap_or_else(|| "Unknown".to_string());
            format!("Current Parent: {name}")
        } else {
            format!("Waiting... ({} Joined)", self.players.len())
        };

        LobbyView {
            phase: self.phase(),
            status,
            lobby_ui_visible: !self.started,
            joined: self.players.clone(),
            current_parent: self.current_parent,
        }
    }
}
