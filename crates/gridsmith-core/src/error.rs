//! Error types. None of these are fatal to a session: callers log them
//! and degrade to "no visible effect".

use thiserror::Error;

use crate::types::{BlockId, BlockTypeId, ParticipantId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("invalid object id {0:?}")]
    InvalidType(BlockTypeId),
    #[error("pool for {0:?} is exhausted: next handle is still in use")]
    Exhausted(BlockTypeId),
    #[error("pool has no configured block types")]
    Unconfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    #[error("{participant} does not own {block:?}")]
    NotOwner {
        block: BlockId,
        participant: ParticipantId,
    },
    #[error("handle is not a replicated block")]
    UnknownHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("game already started")]
    AlreadyStarted,
    #[error("{0} has already joined")]
    AlreadyJoined(ParticipantId),
    #[error("lobby is full ({0} players)")]
    Full(usize),
    #[error("{0} is not the lobby owner")]
    NotOwner(ParticipantId),
    #[error("not enough players: {joined} joined, {required} required")]
    NotEnoughPlayers { joined: usize, required: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
