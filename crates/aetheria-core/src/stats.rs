//! Per-kind stat tables for enemies and towers.
//!
//! Consolidates every kind-specific number so the systems can stay
//! kind-agnostic and dispatch on the capability fields instead.

use crate::constants::*;
use crate::enums::{AttackBehavior, EnemyKind, TargetPolicy, TowerKind};

/// Static profile of an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: f32,
    /// Pixels per tick.
    pub speed: f32,
    /// Bounty carried by the enemy.
    pub value: u32,
    /// Maximum shield, if the kind has one.
    pub max_shield: Option<f32>,
    /// Period of the heal-allies pulse, if any.
    pub heal_pulse_period: Option<u32>,
    /// Period of the slow-towers pulse, if any.
    pub chrono_pulse_period: Option<u32>,
    /// Disable applied to the last tower that hit it, on death.
    pub disables_killer_for: Option<u32>,
}

/// Get the profile for an enemy kind.
pub fn enemy_stats(kind: EnemyKind) -> EnemyStats {
    let base = EnemyStats {
        health: 100.0,
        speed: 1.0,
        value: 5,
        max_shield: None,
        heal_pulse_period: None,
        chrono_pulse_period: None,
        disables_killer_for: None,
    };

    match kind {
        EnemyKind::ShadowCrawler => base,
        EnemyKind::ShadowFlyer => EnemyStats {
            health: 60.0,
            speed: 2.0,
            value: 8,
            ..base
        },
        EnemyKind::ShieldingSentinel => EnemyStats {
            health: 150.0,
            speed: 0.8,
            value: 15,
            max_shield: Some(50.0),
            heal_pulse_period: Some(HEAL_PULSE_PERIOD_TICKS),
            ..base
        },
        EnemyKind::ChronoWarper => EnemyStats {
            health: 120.0,
            speed: 1.2,
            value: 20,
            chrono_pulse_period: Some(CHRONO_PULSE_PERIOD_TICKS),
            ..base
        },
        EnemyKind::Saboteur => EnemyStats {
            health: 80.0,
            speed: 1.5,
            value: 25,
            disables_killer_for: Some(SABOTEUR_DISABLE_TICKS),
            ..base
        },
    }
}

/// Static profile of a tower kind at upgrade level 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerStats {
    /// Persistent currency needed to build it.
    pub cost: u32,
    pub range: f32,
    pub damage: f32,
    /// Ticks between attacks at full fire rate.
    pub fire_interval: u32,
    /// Length of the attack effect window.
    pub vfx_ticks: u32,
    pub behavior: AttackBehavior,
    pub policy: TargetPolicy,
}

/// Get the profile for a tower kind.
pub fn tower_stats(kind: TowerKind) -> TowerStats {
    match kind {
        TowerKind::Sunfire => TowerStats {
            cost: 100,
            range: 150.0,
            damage: 25.0,
            fire_interval: 45,
            vfx_ticks: 15,
            behavior: AttackBehavior::Direct,
            policy: TargetPolicy::Sticky,
        },
        TowerKind::Frost => TowerStats {
            cost: 75,
            range: 120.0,
            damage: 0.0,
            fire_interval: 60,
            vfx_ticks: 5,
            behavior: AttackBehavior::SlowOnly,
            policy: TargetPolicy::Nearest,
        },
        TowerKind::Storm => TowerStats {
            cost: 150,
            range: 130.0,
            damage: 15.0,
            fire_interval: 75,
            vfx_ticks: 20,
            behavior: AttackBehavior::Splash {
                radius: STORM_SPLASH_RADIUS,
            },
            policy: TargetPolicy::Nearest,
        },
        TowerKind::Nova => TowerStats {
            cost: 125,
            range: 100.0,
            damage: 10.0,
            fire_interval: 60,
            vfx_ticks: 20,
            behavior: AttackBehavior::AreaPulse {
                radius: NOVA_PULSE_RADIUS,
            },
            policy: TargetPolicy::Nearest,
        },
    }
}

/// Cost of the first upgrade for a tower kind.
pub fn initial_upgrade_cost(kind: TowerKind) -> u32 {
    tower_stats(kind).cost / 2
}
