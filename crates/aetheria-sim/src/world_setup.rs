//! Entity spawn factories.
//!
//! Creates enemies, towers, and barricades with the component bundles the
//! systems expect.

use glam::Vec2;
use hecs::{Entity, EntityBuilder, World};

use aetheria_core::components::*;
use aetheria_core::constants::*;
use aetheria_core::enums::*;
use aetheria_core::stats::{enemy_stats, initial_upgrade_cost, tower_stats};
use aetheria_core::timers::{TimerKind, Timers};

use crate::relations::{LastHitBy, TowerTarget};

/// Spawn an enemy at `start` (the first waypoint).
pub fn spawn_enemy(world: &mut World, kind: EnemyKind, start: Vec2, order: u64) -> Entity {
    let stats = enemy_stats(kind);

    let mut timers = Timers::new();
    if let Some(period) = stats.heal_pulse_period {
        timers.set_repeating(TimerKind::HealPulse, period);
    }
    if let Some(period) = stats.chrono_pulse_period {
        timers.set_repeating(TimerKind::ChronoPulse, period);
    }

    let mut builder = EntityBuilder::new();
    builder
        .add(Enemy { kind })
        .add(Position(start))
        .add(Health {
            current: stats.health,
            max: stats.health,
        })
        .add(Mover {
            path_index: 0,
            speed: stats.speed,
            base_speed: stats.speed,
        })
        .add(Bounty { value: stats.value })
        .add(Melee::default())
        .add(SpawnOrder(order))
        .add(LastHitBy::default())
        .add(timers);
    if let Some(max) = stats.max_shield {
        builder.add(Shield { current: max, max });
    }
    world.spawn(builder.build())
}

/// Spawn a tower of `kind` on a plot.
pub fn spawn_tower(
    world: &mut World,
    kind: TowerKind,
    plot: usize,
    position: Vec2,
    order: u64,
) -> Entity {
    let stats = tower_stats(kind);
    world.spawn((
        Tower {
            kind,
            plot,
            upgrade_level: 0,
            invested: stats.cost,
            upgrade_cost: initial_upgrade_cost(kind),
            range: stats.range,
            damage: stats.damage,
            fire_interval: stats.fire_interval,
            cooldown: 0,
            fire_rate_factor: 1.0,
        },
        Position(position),
        PlacementOrder(order),
        TowerTarget::default(),
        Timers::new(),
    ))
}

/// Spawn a barricade on a spot.
pub fn spawn_barricade(world: &mut World, spot: usize, position: Vec2, order: u64) -> Entity {
    world.spawn((
        Barricade {
            spot,
            health: BARRICADE_HEALTH,
            max_health: BARRICADE_HEALTH,
            lifetime: BARRICADE_LIFETIME_TICKS,
        },
        Position(position),
        PlacementOrder(order),
    ))
}
