//! The single death pass.
//!
//! Runs once per step, after every source of damage. Each enemy at or
//! below zero health is credited, has its on-death effect applied,
//! announced, and removed, in spawn order. Nothing else removes enemies
//! for having no health, so a kill is credited exactly once.

use hecs::{Entity, World};
use tracing::debug;

use aetheria_campaign::Economy;
use aetheria_core::components::{Bounty, Enemy, Health, Tower};
use aetheria_core::enums::RewardPolicy;
use aetheria_core::events::GameEvent;
use aetheria_core::stats::enemy_stats;
use aetheria_core::timers::{TimerKind, Timers};

use crate::relations::{entity_id, live, LastHitBy};

/// Remove dead enemies. Returns the number of kills.
pub fn run(
    world: &mut World,
    economy: &mut Economy,
    policy: RewardPolicy,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) -> u32 {
    despawn_buffer.clear();
    let mut kills = 0;

    for (entity, position) in super::enemies_in_spawn_order(world) {
        let Ok((enemy, health, bounty, last_hit)) =
            world.query_one_mut::<(&Enemy, &Health, &Bounty, &LastHitBy)>(entity)
        else {
            continue;
        };
        if health.current > 0.0 {
            continue;
        }
        let (kind, value, last_hit) = (enemy.kind, bounty.value, last_hit.0);

        let reward = match policy {
            RewardPolicy::Fixed(amount) => amount,
            RewardPolicy::EnemyValue => value,
        };
        economy.credit_kill(reward);

        let killer = live(world, last_hit).filter(|&t| world.get::<&Tower>(t).is_ok());
        if let (Some(ticks), Some(tower)) = (enemy_stats(kind).disables_killer_for, killer) {
            if let Ok(mut timers) = world.get::<&mut Timers>(tower) {
                timers.set(TimerKind::Disabled, ticks);
                events.push(GameEvent::TowerDisabled {
                    id: entity_id(tower),
                    ticks,
                });
                debug!(tower = entity_id(tower), ticks, "tower disabled on kill");
            }
        }

        events.push(GameEvent::EnemyDied {
            id: entity_id(entity),
            kind,
            position,
            killer: killer.map(entity_id),
            reward,
        });
        despawn_buffer.push(entity);
        kills += 1;
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    kills
}
