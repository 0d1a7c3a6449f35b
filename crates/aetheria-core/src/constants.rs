//! Simulation constants and tuning parameters.
//!
//! All gameplay timers are expressed in ticks; distances in pixels;
//! speeds in pixels per tick.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Maximum simulation steps per frame selectable with game speed.
pub const MAX_GAME_SPEED: u32 = 3;

// --- Objective ---

/// Heartcrystal health at the start of a run.
pub const HEARTCRYSTAL_MAX_HEALTH: i32 = 100;

/// Heartcrystal damage per enemy reaching the end of the path.
pub const HEARTCRYSTAL_BREACH_DAMAGE: i32 = 10;

// --- Waves ---

/// Countdown before each wave starts (5 seconds).
pub const WAVE_COUNTDOWN_TICKS: u32 = 5 * TICK_RATE;

/// Ticks between consecutive spawns within a wave.
pub const SPAWN_INTERVAL_TICKS: u32 = 30;

/// Clearing this wave wins the run.
pub const FINAL_WAVE: u32 = 10;

/// Crawlers per wave number.
pub const CRAWLERS_PER_WAVE: u32 = 3;

/// Flyers per wave number.
pub const FLYERS_PER_WAVE: u32 = 2;

/// First wave with shielding sentinels.
pub const SENTINEL_FIRST_WAVE: u32 = 4;

/// First wave with chrono warpers.
pub const WARPER_FIRST_WAVE: u32 = 6;

/// First wave with saboteurs.
pub const SABOTEUR_FIRST_WAVE: u32 = 8;

// --- Economy ---

/// Persistent currency for a brand new profile.
pub const DEFAULT_PERSISTENT_CURRENCY: u32 = 500;

/// Volatile currency credited per kill with the fixed reward policy.
pub const KILL_REWARD: u32 = 10;

/// Volatile → persistent conversion (percent) for a wave without breaches.
pub const CONVERSION_PERCENT_FULL: u32 = 50;

/// Volatile → persistent conversion (percent) for a wave with a breach.
pub const CONVERSION_PERCENT_PENALIZED: u32 = 25;

/// Persistent cost of unlocking a purchasable tower plot.
pub const PLOT_COST: u32 = 150;

// --- Enemies (shared) ---

/// Collision extent of every enemy (square side, pixels).
pub const ENEMY_SIZE: f32 = 30.0;

/// Ticks a blocked enemy waits between melee hits on a barricade.
pub const ENEMY_ATTACK_INTERVAL_TICKS: u32 = 30;

/// Damage of one melee hit on a barricade.
pub const ENEMY_MELEE_DAMAGE: f32 = 10.0;

// --- Enemy abilities ---

/// Shield regenerated per tick once the shield cooldown has expired.
pub const SHIELD_REGEN_PER_TICK: f32 = 1.0;

/// Ticks after the last hit before the shield starts regenerating.
pub const SHIELD_COOLDOWN_TICKS: u32 = 90;

/// Period of the sentinel heal pulse.
pub const HEAL_PULSE_PERIOD_TICKS: u32 = 240;

/// Radius of the sentinel heal pulse.
pub const HEAL_PULSE_RADIUS: f32 = 100.0;

/// Health restored to each ally by a heal pulse.
pub const HEAL_PULSE_AMOUNT: f32 = 15.0;

/// Period of the chrono warper tower-slow pulse.
pub const CHRONO_PULSE_PERIOD_TICKS: u32 = 300;

/// Radius of the chrono warper pulse.
pub const CHRONO_PULSE_RADIUS: f32 = 150.0;

/// Fire-rate slow factor applied to towers by a chrono pulse.
pub const CHRONO_SLOW_FACTOR: f32 = 0.5;

/// Duration of the tower fire-rate slow.
pub const CHRONO_SLOW_TICKS: u32 = 180;

/// Visual flash window after any pulse fires. Cosmetic only.
pub const PULSE_FLASH_TICKS: u32 = 20;

/// Duration a saboteur's death disables the tower that last hit it.
pub const SABOTEUR_DISABLE_TICKS: u32 = 300;

// --- Towers ---

/// Damage multiplier per upgrade.
pub const UPGRADE_DAMAGE_FACTOR: f32 = 1.25;

/// Range multiplier per upgrade.
pub const UPGRADE_RANGE_FACTOR: f32 = 1.10;

/// Next upgrade cost multiplier per upgrade.
pub const UPGRADE_COST_FACTOR: f32 = 1.5;

/// Highest upgrade level a tower can reach.
pub const MAX_UPGRADE_LEVEL: u32 = 5;

/// Frost spire slow factor applied to enemy speed.
pub const FROST_SLOW_FACTOR: f32 = 0.5;

/// Frost spire slow duration.
pub const FROST_SLOW_TICKS: u32 = 120;

/// Storm spire splash radius around the primary target.
pub const STORM_SPLASH_RADIUS: f32 = 60.0;

/// Nova spire pulse radius around the tower.
pub const NOVA_PULSE_RADIUS: f32 = 90.0;

// --- Barricades ---

/// Barricade side length (pixels).
pub const BARRICADE_SIZE: f32 = 40.0;

/// Barricade starting health.
pub const BARRICADE_HEALTH: f32 = 200.0;

/// Barricade lifetime (10 seconds).
pub const BARRICADE_LIFETIME_TICKS: u32 = 10 * TICK_RATE;

/// Volatile cost of placing a barricade.
pub const BARRICADE_COST: u32 = 50;

// --- Player abilities ---

/// Global damage multiplier while Empower is active.
pub const EMPOWER_MULTIPLIER: f32 = 2.0;

/// Empower duration (5 seconds).
pub const EMPOWER_DURATION_TICKS: u32 = 5 * TICK_RATE;

/// Volatile cost of Empower.
pub const EMPOWER_COST: u32 = 100;

/// Starfall damage to every enemy inside the radius.
pub const STARFALL_DAMAGE: f32 = 80.0;

/// Starfall radius around the chosen point.
pub const STARFALL_RADIUS: f32 = 100.0;

/// Volatile cost of Starfall.
pub const STARFALL_COST: u32 = 75;

// --- Map ---

/// Side length of a tower plot hit-box.
pub const PLOT_SIZE: f32 = 50.0;

/// Logical map width.
pub const MAP_WIDTH: f32 = 1280.0;

/// Logical map height.
pub const MAP_HEIGHT: f32 = 720.0;
