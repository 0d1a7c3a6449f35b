//! Game state snapshot: the complete visible state handed to the render
//! collaborator after each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete read-only game state after a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: Option<LevelView>,
    pub wave: WaveView,
    pub heartcrystal: i32,
    pub economy: EconomyView,
    /// Global tower damage multiplier in effect.
    pub damage_multiplier: f32,
    pub game_speed: u32,
    pub selection: Option<Selection>,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub barricades: Vec<BarricadeView>,
    pub plots: Vec<PlotView>,
    pub events: Vec<GameEvent>,
}

/// Static description of the level being played.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelView {
    pub id: LevelId,
    pub name: String,
    pub difficulty: String,
    pub path: Vec<Vec2>,
    pub barricade_spots: Vec<Vec2>,
}

/// Wave progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// Current wave number; 0 before the first wave.
    pub number: u32,
    pub final_wave: u32,
    /// Enemies still waiting to spawn.
    pub queued: u32,
    /// Ticks until the next wave starts; 0 while a wave is running.
    pub countdown: u32,
    /// Whether the heartcrystal was breached during this wave.
    pub breached: bool,
}

/// Both currency balances.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub persistent: u32,
    pub volatile: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub shield: Option<f32>,
    pub visual: VisualState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u64,
    pub kind: TowerKind,
    pub plot: usize,
    pub position: Vec2,
    pub upgrade_level: u32,
    pub upgrade_cost: u32,
    pub range: f32,
    pub damage: f32,
    /// Position of the current target, for beam rendering.
    pub target_position: Option<Vec2>,
    pub visual: VisualState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarricadeView {
    pub id: u64,
    pub spot: usize,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub lifetime: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotView {
    pub index: usize,
    pub position: Vec2,
    pub owned: bool,
    pub occupied: bool,
}
