//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Commands arrive via an `mpsc` channel and are queued on the
//! engine, which applies them at the next frame. Game speed is handled by
//! the engine itself (several steps per frame), so the frame period here is
//! fixed.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use aetheria_core::constants::TICK_RATE;
use aetheria_core::state::GameStateSnapshot;
use aetheria_sim::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, SharedSnapshot};

/// Duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Running game loop: the command channel plus the thread that owns the engine.
pub struct GameLoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    thread: JoinHandle<Option<GameStateSnapshot>>,
}

impl GameLoopHandle {
    /// Wait for the loop to finish. Yields the last snapshot it produced,
    /// or `None` if the thread panicked or never ran a frame.
    pub fn join(self) -> Option<GameStateSnapshot> {
        self.thread.join().ok().flatten()
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: SharedSnapshot,
) -> io::Result<GameLoopHandle> {
    let (command_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("aetheria-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &latest_snapshot))?;

    Ok(GameLoopHandle { command_tx, thread })
}

/// The game loop. Runs until the run ends, a Shutdown command arrives, or
/// the channel disconnects.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> Option<GameStateSnapshot> {
    let mut engine = SimulationEngine::new(config);
    let mut last = None;
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    debug!("game loop shut down");
                    return last;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return last,
            }
        }

        // 2. Advance one frame (engine handles pause and speed internally)
        let snapshot = engine.tick();
        let finished = snapshot.phase.is_terminal();

        // 3. Publish for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        last = Some(snapshot);

        if finished {
            info!(tick = engine.time().tick, phase = ?engine.phase(), "game loop finished");
            return last;
        }

        // 4. Sleep until the next frame
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{latest, new_shared_snapshot};
    use aetheria_core::commands::PlayerCommand;
    use aetheria_core::enums::{GamePhase, LevelId};

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartRun {
            level: LevelId::Meadow,
        }))
        .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::TogglePause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartRun { .. })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::TogglePause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartRun {
            level: LevelId::Meadow,
        });

        // Past the first countdown so enemies are on the field
        for _ in 0..400 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_shutdown_returns_last_snapshot() {
        let shared = new_shared_snapshot();
        let handle = spawn_game_loop(SimConfig::default(), shared.clone()).unwrap();

        handle
            .command_tx
            .send(GameLoopCommand::PlayerCommand(PlayerCommand::StartRun {
                level: LevelId::Meadow,
            }))
            .unwrap();
        // Wait until the run is visible, then stop the loop.
        let deadline = Instant::now() + Duration::from_secs(5);
        while latest(&shared).map_or(true, |s| s.phase != GamePhase::Active) {
            assert!(Instant::now() < deadline, "run never started");
            std::thread::sleep(Duration::from_millis(5));
        }
        handle.command_tx.send(GameLoopCommand::Shutdown).unwrap();

        let last = handle.join().unwrap();
        assert_eq!(last.phase, GamePhase::Active);
        assert!(last.level.is_some());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
