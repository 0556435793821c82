//! Game loop thread: runs the session at 30Hz and publishes snapshots.
//!
//! The session is created inside this thread, which owns it outright.
//! Commands arrive via an `mpsc` channel. Snapshots are stored in shared
//! state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use gridsmith_core::config::SessionConfig;
use gridsmith_core::constants::TICK_RATE;
use gridsmith_core::state::SessionSnapshot;
use gridsmith_sim::Session;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SessionConfig,
    latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("gridsmith-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Apply one loop command. Returns false when the loop should stop.
fn handle_command(session: &mut Session, command: GameLoopCommand) -> bool {
    match command {
        GameLoopCommand::Connect {
            display_name,
            reply,
        } => {
            let id = session.add_participant(&display_name);
            // The caller may have stopped waiting.
            let _ = reply.send(id);
        }
        GameLoopCommand::Disconnect(id) => session.remove_participant(id),
        GameLoopCommand::Player(id, command) => session.queue_command(id, command),
        GameLoopCommand::Shutdown => return false,
    }
    true
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SessionConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SessionSnapshot>>,
) {
    let mut session = Session::new(config);
    let mut next_tick_time = Instant::now();
    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if !handle_command(&mut session, command) {
                        info!(tick = session.time().tick, "game loop shut down");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("command channel closed");
                    return;
                }
            }
        }

        // 2. Advance one tick
        let snapshot = session.tick();
        if !snapshot.events.is_empty() {
            trace!(tick = snapshot.time.tick, events = ?snapshot.events, "tick events");
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
