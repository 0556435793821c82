//! Application state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use gridsmith_core::commands::PlayerCommand;
use gridsmith_core::config::SessionConfig;
use gridsmith_core::state::SessionSnapshot;
use gridsmith_core::types::ParticipantId;

use crate::game_loop;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Add a participant; the assigned id is sent back on `reply`.
    Connect {
        display_name: String,
        reply: mpsc::Sender<ParticipantId>,
    },
    /// Remove a participant from the session.
    Disconnect(ParticipantId),
    /// A participant command to forward to the session.
    Player(ParticipantId, PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("session already running")]
    AlreadyRunning,
    #[error("session not started")]
    NotStarted,
    #[error("game loop is gone")]
    Disconnected,
    #[error("state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handle to a running (or not yet started) session.
///
/// - The `mpsc::Sender` sits behind a `Mutex` so the state can be shared across threads.
/// - `latest_snapshot` is written by the game loop after every tick.
#[derive(Default)]
pub struct AppState {
    /// `None` before `start` and after `shutdown`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
    loop_thread: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop for a new session.
    pub fn start(&self, config: SessionConfig) -> Result<(), AppError> {
        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        if tx_lock.is_some() {
            return Err(AppError::AlreadyRunning);
        }
        let (cmd_tx, handle) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())?;
        *tx_lock = Some(cmd_tx);
        *self.loop_thread.lock().map_err(|_| AppError::Poisoned)? = Some(handle);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.command_tx.lock().is_ok_and(|tx| tx.is_some())
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| AppError::Disconnected),
            None => Err(AppError::NotStarted),
        }
    }

    /// Add a participant and wait for the id the session assigns.
    pub fn connect(&self, display_name: &str) -> Result<ParticipantId, AppError> {
        let (reply, rx) = mpsc::channel();
        self.send(GameLoopCommand::Connect {
            display_name: display_name.to_string(),
            reply,
        })?;
        rx.recv().map_err(|_| AppError::Disconnected)
    }

    pub fn disconnect(&self, participant: ParticipantId) -> Result<(), AppError> {
        self.send(GameLoopCommand::Disconnect(participant))
    }

    pub fn send_command(
        &self,
        participant: ParticipantId,
        command: PlayerCommand,
    ) -> Result<(), AppError> {
        self.send(GameLoopCommand::Player(participant, command))
    }

    /// The most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Result<Option<SessionSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Stop the game loop and wait for its thread to exit.
    pub fn shutdown(&self) -> Result<(), AppError> {
        let tx = self
            .command_tx
            .lock()
            .map_err(|_| AppError::Poisoned)?
            .take();
        let Some(tx) = tx else {
            return Err(AppError::NotStarted);
        };
        // A loop that already exited has dropped its receiver; nothing to stop.
        let _ = tx.send(GameLoopCommand::Shutdown);

        let handle = self.loop_thread.lock().map_err(|_| AppError::Poisoned)?.take();
        if let Some(handle) = handle {
            handle.join().map_err(|_| AppError::Disconnected)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!state.is_running());
    }

    #[test]
    fn test_commands_before_start_fail() {
        let state = AppState::new();
        assert!(matches!(
            state.send_command(ParticipantId(0), PlayerCommand::JoinGame),
            Err(AppError::NotStarted)
        ));
        assert!(matches!(state.shutdown(), Err(AppError::NotStarted)));
        assert!(matches!(
            state.disconnect(ParticipantId(0)),
            Err(AppError::NotStarted)
        ));
    }

    #[test]
    fn test_start_connect_shutdown() {
        let state = AppState::new();
        state.start(SessionConfig::default()).unwrap();
        assert!(state.is_running());
        assert!(matches!(
            state.start(SessionConfig::default()),
            Err(AppError::AlreadyRunning)
        ));

        let alice = state.connect("Alice").unwrap();
        let bob = state.connect("Bob").unwrap();
        assert_eq!(alice, ParticipantId(0));
        assert_eq!(bob, ParticipantId(1));

        state.disconnect(bob).unwrap();
        std::thread::sleep(crate::game_loop::TICK_DURATION * 4);
        let snapshot = state.snapshot().unwrap().unwrap();
        let ids: Vec<_> = snapshot.participants.iter().map(|p| p.participant).collect();
        assert_eq!(ids, vec![alice]);

        state.shutdown().unwrap();
        assert!(!state.is_running());
        assert!(matches!(
            state.send_command(alice, PlayerCommand::JoinGame),
            Err(AppError::NotStarted)
        ));
    }
}
