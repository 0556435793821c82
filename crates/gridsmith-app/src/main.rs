//! `gridsmith [config.json]`
//!
//! Runs a short scripted session on the game-loop thread: two participants
//! join, the round starts, the parent places and removes a block from the
//! inventory and the other participant drops one with the direct placer
//! before leaving.

use glam::{Quat, Vec3};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gridsmith_app::game_loop::TICK_DURATION;
use gridsmith_app::state::AppState;
use gridsmith_core::commands::PlayerCommand;
use gridsmith_core::config::SessionConfig;
use gridsmith_core::enums::{InputKey, PlacementMode};
use gridsmith_core::state::SessionSnapshot;

/// Ticks to wait for the loop to apply queued commands.
const SETTLE_TICKS: u32 = 4;

fn load_config() -> Result<SessionConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let config = SessionConfig::from_json_str(&json)?;
            info!(%path, "config loaded");
            Ok(config)
        }
        None => Ok(SessionConfig::default()),
    }
}

fn settle(state: &AppState) -> Result<SessionSnapshot, Box<dyn std::error::Error>> {
    std::thread::sleep(TICK_DURATION * SETTLE_TICKS);
    state
        .snapshot()?
        .ok_or_else(|| "no snapshot published yet".into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let state = AppState::new();
    state.start(config)?;

    let alice = state.connect("Alice")?;
    let bob = state.connect("Bob")?;
    state.send_command(alice, PlayerCommand::JoinGame)?;
    state.send_command(bob, PlayerCommand::JoinGame)?;
    // Bob joined last and owns the lobby.
    state.send_command(bob, PlayerCommand::StartGame)?;

    let snapshot = settle(&state)?;
    info!(status = %snapshot.lobby.status, "round running");
    let Some(parent) = snapshot.lobby.current_parent else {
        warn!("round did not start");
        state.shutdown()?;
        return Ok(());
    };
    let other = if parent == alice { bob } else { alice };

    let look_ahead = PlayerCommand::UpdateHeadPose {
        position: Vec3::new(0.0, 1.6, 0.0),
        rotation: Quat::IDENTITY,
    };
    state.send_command(parent, look_ahead.clone())?;
    state.send_command(parent, PlayerCommand::KeyDown { key: InputKey::E })?;
    let snapshot = settle(&state)?;
    info!(blocks = snapshot.blocks.len(), "after inventory placement");

    state.send_command(parent, PlayerCommand::KeyDown { key: InputKey::R })?;
    let snapshot = settle(&state)?;
    info!(blocks = snapshot.blocks.len(), "after removal");

    state.send_command(other, look_ahead)?;
    state.send_command(
        other,
        PlayerCommand::SetPlacementMode {
            mode: PlacementMode::Direct,
        },
    )?;
    state.send_command(other, PlayerCommand::KeyDown { key: InputKey::MouseLeft })?;
    let snapshot = settle(&state)?;
    for block in &snapshot.blocks {
        info!(block = ?block.block, position = ?block.position, owner = ?block.owner, "block");
    }
    for p in &snapshot.participants {
        info!(
            participant = %p.participant,
            name = %p.display_name,
            stock = p.stock,
            input_enabled = p.input_enabled,
            "participant"
        );
    }

    state.disconnect(other)?;
    let snapshot = settle(&state)?;
    info!(participants = snapshot.participants.len(), "after disconnect");

    state.shutdown()?;
    info!(tick = snapshot.time.tick, "session finished");
    Ok(())
}
