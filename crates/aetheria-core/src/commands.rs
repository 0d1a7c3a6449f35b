//! Player commands sent from the input collaborator to the simulation.
//!
//! Commands are queued and applied at the next frame boundary, before any
//! simulation step of that frame runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Start a new run on a built-in level.
    StartRun { level: LevelId },
    /// Restart the current level from scratch.
    Restart,

    // --- Placement ---
    /// Arm tower placement; confirmed by `PlaceAt`.
    SelectTower { kind: TowerKind },
    /// Arm barricade placement; confirmed by `PlaceAt`.
    SelectBarricade,
    /// Arm plot purchase; confirmed by `PlaceAt`.
    SelectPlotPurchase,
    /// Confirm the current selection at a point. Clears the selection.
    PlaceAt { point: Vec2 },
    /// Drop the current selection without side effects.
    CancelPlacement,
    /// Upgrade the tower on the plot containing `point`.
    UpgradeAt { point: Vec2 },

    // --- Abilities ---
    /// Activate a player ability. `target` is only used by Starfall.
    ActivateAbility {
        kind: AbilityKind,
        target: Option<Vec2>,
    },

    // --- Simulation control ---
    TogglePause,
    /// Simulation steps per frame, clamped to 1..=3.
    SetGameSpeed { speed: u32 },
}
