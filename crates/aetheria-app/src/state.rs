//! State shared between the session driver and the game loop thread.

use std::sync::{Arc, Mutex};

use aetheria_core::commands::PlayerCommand;
use aetheria_core::state::GameStateSnapshot;

/// Commands sent from the session driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot published by the game loop, for polling.
///
/// `None` until the first frame has run.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

pub fn new_shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}

/// Clone of the latest published snapshot. A poisoned lock reads as empty.
pub fn latest(shared: &SharedSnapshot) -> Option<GameStateSnapshot> {
    shared.lock().ok().and_then(|lock| lock.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_snapshot_starts_empty() {
        let shared = new_shared_snapshot();
        assert!(latest(&shared).is_none());

        *shared.lock().unwrap() = Some(GameStateSnapshot::default());
        assert!(latest(&shared).is_some());
    }
}
