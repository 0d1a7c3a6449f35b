//! Events emitted by the simulation for audio and VFX feedback.
//!
//! Events are fire-and-forget: nothing in the simulation reads them back.
//! Entity ids are `hecs::Entity::to_bits` values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// One-shot notification for the audio/VFX collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Enemies ---
    EnemySpawned {
        id: u64,
        kind: EnemyKind,
        wave: u32,
    },
    /// Damage landed on an enemy (shield and health combined).
    EnemyHit {
        id: u64,
        amount: f32,
        source: DamageSource,
    },
    EnemyDied {
        id: u64,
        kind: EnemyKind,
        position: Vec2,
        /// Tower that landed the last hit, if it was a tower.
        killer: Option<u64>,
        reward: u32,
    },
    /// An enemy reached the end of the path.
    HeartcrystalBreached {
        id: u64,
        damage: i32,
        remaining: i32,
    },
    /// A heal pulse fired.
    EnemiesHealed {
        source: u64,
        healed: u32,
    },

    // --- Towers ---
    TowerFired {
        id: u64,
        kind: TowerKind,
        target: Option<u64>,
    },
    TowerDisabled {
        id: u64,
        ticks: u32,
    },
    /// A chrono pulse slowed a tower's fire rate.
    TowerSlowed {
        id: u64,
        factor: f32,
        ticks: u32,
    },
    TowerPlaced {
        id: u64,
        kind: TowerKind,
        plot: usize,
    },
    TowerUpgraded {
        id: u64,
        level: u32,
        cost: u32,
    },

    // --- Barricades, plots ---
    BarricadePlaced {
        id: u64,
        spot: usize,
    },
    BarricadeDestroyed {
        id: u64,
        spot: usize,
    },
    PlotPurchased {
        plot: usize,
    },
    /// A placement, purchase, or upgrade was refused. State is unchanged.
    PlacementRejected {
        reason: String,
    },

    // --- Abilities ---
    AbilityActivated {
        kind: AbilityKind,
        target: Option<Vec2>,
    },

    // --- Waves and run ---
    WaveStarted {
        wave: u32,
        enemies: u32,
    },
    WaveCleared {
        wave: u32,
        converted: u32,
        breached: bool,
    },
    RunEnded {
        outcome: RunOutcome,
        wave: u32,
    },
}
