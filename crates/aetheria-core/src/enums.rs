//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Slow, sturdy baseline walker.
    ShadowCrawler,
    /// Fast, fragile baseline.
    ShadowFlyer,
    /// Regenerating shield plus a periodic heal on nearby allies.
    ShieldingSentinel,
    /// Periodically slows the fire rate of nearby towers.
    ChronoWarper,
    /// Disables the tower that last hit it when it dies.
    Saboteur,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::ShadowCrawler,
        EnemyKind::ShadowFlyer,
        EnemyKind::ShieldingSentinel,
        EnemyKind::ChronoWarper,
        EnemyKind::Saboteur,
    ];
}

/// Tower ("spire") kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Single-target beam with a sticky target.
    Sunfire,
    /// Single-target slow, never damages.
    Frost,
    /// Damages the primary target and everything near it.
    Storm,
    /// Damages everything near the tower itself.
    Nova,
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Sunfire,
        TowerKind::Frost,
        TowerKind::Storm,
        TowerKind::Nova,
    ];
}

/// How a tower resolves an attack once it has a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackBehavior {
    /// Damage the target only.
    Direct,
    /// Slow the target only.
    SlowOnly,
    /// Damage the target and every enemy within a radius of the target.
    Splash { radius: f32 },
    /// Damage every enemy within a radius of the tower.
    AreaPulse { radius: f32 },
}

/// Whether a tower keeps its target between attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPolicy {
    /// Keep the current target while it is live and in range.
    Sticky,
    /// Pick the nearest enemy on every attack.
    Nearest,
}

/// Player-activated ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Timed global tower damage multiplier.
    Empower,
    /// Instant area strike at a chosen point.
    Starfall,
}

/// Built-in level identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    #[default]
    Meadow,
    Twilight,
    Spire,
}

impl LevelId {
    pub const ALL: [LevelId; 3] = [LevelId::Meadow, LevelId::Twilight, LevelId::Spire];
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run in progress.
    #[default]
    MainMenu,
    Active,
    Paused,
    /// All waves cleared.
    Victory,
    /// Heartcrystal destroyed.
    Defeat,
}

impl GamePhase {
    /// Whether the run has reached a designed end state.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// What a pending `PlaceAt` will try to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Tower(TowerKind),
    Barricade,
    PlotPurchase,
}

/// Visual state handed to the render collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualState {
    #[default]
    Normal,
    /// Enemy slowed, or tower fire rate slowed.
    Slowed,
    /// Tower disabled.
    Disabled,
    /// Tower attack effect (beam, frost ring, storm pulse) is showing.
    Firing,
    /// Enemy pulse ability just fired.
    Pulsing,
    /// Enemy stopped at a barricade.
    Blocked,
}

/// Who dealt a point of damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    /// A tower, identified by its entity bits.
    Tower(u64),
    /// A player ability.
    Ability(AbilityKind),
}

/// How kills are credited to the volatile balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardPolicy {
    /// The same reward for every kill.
    Fixed(u32),
    /// The killed enemy's `value`.
    EnemyValue,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        RewardPolicy::Fixed(crate::constants::KILL_REWARD)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat,
}
