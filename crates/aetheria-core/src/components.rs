//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems, not
//! components. Components that reference other entities live in the sim
//! crate, next to the ECS.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, TowerKind};

/// World position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Marks an entity as an enemy and names its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Hit points. `current` may drop to or below zero; the death pass removes
/// the entity in the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Path-following state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    /// Index of the waypoint most recently reached.
    pub path_index: usize,
    /// Current speed (pixels per tick).
    pub speed: f32,
    /// Unmodified speed; restored exactly when a slow expires.
    pub base_speed: f32,
}

/// Damage-absorbing shield (shielding sentinels only).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub current: f32,
    pub max: f32,
}

/// Bounty carried by an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounty {
    pub value: u32,
}

/// Melee state against barricades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Melee {
    /// Ticks accrued while blocked since the last hit.
    pub attack_timer: u32,
    /// Whether the enemy was blocked this tick.
    pub blocked: bool,
}

/// Spawn sequence number; defines enemy iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// A placed tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub kind: TowerKind,
    /// Plot index within the level.
    pub plot: usize,
    pub upgrade_level: u32,
    /// Persistent currency invested so far (build plus upgrades).
    pub invested: u32,
    /// Price of the next upgrade.
    pub upgrade_cost: u32,
    pub range: f32,
    pub damage: f32,
    /// Ticks between attacks at full fire rate.
    pub fire_interval: u32,
    /// Ticks until the next attack may happen.
    pub cooldown: u32,
    /// Fire-rate factor; below 1.0 while slowed.
    pub fire_rate_factor: f32,
}

/// A placed barricade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Barricade {
    /// Spot index within the level.
    pub spot: usize,
    pub health: f32,
    pub max_health: f32,
    pub lifetime: u32,
}

/// Placement sequence number; defines barricade blocking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlacementOrder(pub u64);
