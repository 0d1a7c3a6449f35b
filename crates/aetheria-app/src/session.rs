//! One headless session: load the balance, play a run, save the balance.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use aetheria_core::commands::PlayerCommand;
use aetheria_core::constants::DEFAULT_PERSISTENT_CURRENCY;
use aetheria_core::enums::LevelId;
use aetheria_core::state::GameStateSnapshot;
use aetheria_sim::SimConfig;

use crate::autopilot::Autopilot;
use crate::game_loop::{self, TICK_DURATION};
use crate::persistence::{CurrencyStore, PersistenceError};
use crate::state::{latest, new_shared_snapshot, GameLoopCommand};

/// How often the driver polls the published snapshot.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to start the game loop: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("game loop ended without producing a frame")]
    NoFrames,
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Play one run on `level` with the autopilot and persist the final balance.
///
/// A balance that cannot be loaded falls back to the default so the session
/// still runs; a balance that cannot be saved is an error.
pub fn run_session(
    store: &dyn CurrencyStore,
    level: LevelId,
    config: SimConfig,
) -> Result<GameStateSnapshot, SessionError> {
    let starting_persistent = store.load_persistent_currency().unwrap_or_else(|err| {
        warn!(%err, "could not load persistent currency, using default");
        DEFAULT_PERSISTENT_CURRENCY
    });
    info!(starting_persistent, ?level, "session starting");

    let shared = new_shared_snapshot();
    let handle = game_loop::spawn_game_loop(
        SimConfig {
            starting_persistent,
            ..config
        },
        shared.clone(),
    )?;

    let mut autopilot = Autopilot::new();
    let mut commands = vec![PlayerCommand::StartRun { level }];
    loop {
        let delivered = commands
            .drain(..)
            .all(|cmd| handle.command_tx.send(GameLoopCommand::PlayerCommand(cmd)).is_ok());
        if !delivered {
            // The loop has already exited.
            break;
        }

        std::thread::sleep(POLL_INTERVAL.max(TICK_DURATION));
        let Some(snapshot) = latest(&shared) else {
            continue;
        };
        if snapshot.phase.is_terminal() {
            break;
        }
        commands = autopilot.decide(&snapshot);
    }

    let last = handle.join().ok_or(SessionError::NoFrames)?;
    let persistent = last.economy.persistent;
    store.save_persistent_currency(persistent)?;
    info!(
        phase = ?last.phase,
        wave = last.wave.number,
        persistent,
        "session finished"
    );
    Ok(last)
}
