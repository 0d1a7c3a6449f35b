//! Tower phase: targeting and attack resolution.
//!
//! Per tower, in placement order:
//! 1. Tick timers (fire-rate slow expiry restores the fire rate).
//! 2. Count the cooldown down. This happens even while disabled.
//! 3. Disabled or cooling down: stop here.
//! 4. Acquire: sticky towers keep a live in-range target, otherwise the
//!    nearest enemy strictly inside `range` wins, ties to spawn order.
//! 5. Attack with the kind's behaviour, reset the cooldown, start the
//!    effect window.
//!
//! Enemy positions are snapshotted once at the start of the phase. No
//! enemy is removed here, so a target killed by an earlier tower is still
//! a valid (dead-but-present) target until the death pass.

use hecs::{Entity, World};

use aetheria_core::components::{Position, Tower};
use aetheria_core::constants::{FROST_SLOW_FACTOR, FROST_SLOW_TICKS};
use aetheria_core::enums::{AttackBehavior, DamageSource, TargetPolicy};
use aetheria_core::events::GameEvent;
use aetheria_core::stats::tower_stats;
use aetheria_core::timers::{ExpiryAction, TimerKind, Timers};
use aetheria_core::types::within_radius;
use aetheria_core::Vec2;

use super::combat::{apply_slow, take_damage};
use crate::relations::{entity_id, live, TowerTarget};

/// Nearest enemy strictly within `range` of `origin`. Ties keep the
/// earlier entry.
pub fn nearest_in_range(enemies: &[(Entity, Vec2)], origin: Vec2, range: f32) -> Option<(Entity, Vec2)> {
    let mut best: Option<(f32, Entity, Vec2)> = None;
    for &(entity, pos) in enemies {
        if !within_radius(origin, pos, range) {
            continue;
        }
        let d2 = origin.distance_squared(pos);
        if best.map_or(true, |(best_d2, _, _)| d2 < best_d2) {
            best = Some((d2, entity, pos));
        }
    }
    best.map(|(_, entity, pos)| (entity, pos))
}

/// Fire interval stretched by the inverse of the fire-rate factor.
pub fn effective_interval(fire_interval: u32, fire_rate_factor: f32) -> u32 {
    if fire_rate_factor > 0.0 && fire_rate_factor < 1.0 {
        (fire_interval as f32 / fire_rate_factor).ceil() as u32
    } else {
        fire_interval
    }
    .max(1)
}

struct Ready {
    tower: Tower,
    position: Vec2,
    current: Option<Entity>,
}

/// Run every tower for one tick. `multiplier` scales all tower damage.
pub fn run(world: &mut World, multiplier: f32, events: &mut Vec<GameEvent>) {
    let enemies = super::enemies_in_spawn_order(world);
    let mut expired = Vec::new();

    for tower_entity in super::towers_in_placement_order(world) {
        let Some(ready) = tick_tower(world, tower_entity, &mut expired) else {
            continue;
        };
        let stats = tower_stats(ready.tower.kind);

        let sticky = match stats.policy {
            TargetPolicy::Sticky => live(world, ready.current).and_then(|t| {
                enemies
                    .iter()
                    .find(|(e, _)| *e == t)
                    .filter(|(_, pos)| within_radius(ready.position, *pos, ready.tower.range))
                    .copied()
            }),
            TargetPolicy::Nearest => None,
        };
        let target = sticky.or_else(|| nearest_in_range(&enemies, ready.position, ready.tower.range));

        let Some((target, target_pos)) = target else {
            if let Ok(mut t) = world.get::<&mut TowerTarget>(tower_entity) {
                t.0 = None;
            }
            continue;
        };

        let damage = ready.tower.damage * multiplier;
        let source = DamageSource::Tower(entity_id(tower_entity));
        let attacker = Some(tower_entity);
        match stats.behavior {
            AttackBehavior::Direct => {
                take_damage(world, target, damage, source, attacker, events);
            }
            AttackBehavior::SlowOnly => {
                apply_slow(world, target, FROST_SLOW_FACTOR, FROST_SLOW_TICKS);
            }
            AttackBehavior::Splash { radius } => {
                take_damage(world, target, damage, source, attacker, events);
                for &(other, pos) in &enemies {
                    if other != target && within_radius(target_pos, pos, radius) {
                        take_damage(world, other, damage, source, attacker, events);
                    }
                }
            }
            AttackBehavior::AreaPulse { radius } => {
                for &(other, pos) in &enemies {
                    if within_radius(ready.position, pos, radius) {
                        take_damage(world, other, damage, source, attacker, events);
                    }
                }
            }
        }

        if let Ok((tower, tower_target, timers)) =
            world.query_one_mut::<(&mut Tower, &mut TowerTarget, &mut Timers)>(tower_entity)
        {
            tower.cooldown = effective_interval(tower.fire_interval, tower.fire_rate_factor);
            tower_target.0 = Some(target);
            timers.set(TimerKind::Vfx, stats.vfx_ticks);
        }
        events.push(GameEvent::TowerFired {
            id: entity_id(tower_entity),
            kind: ready.tower.kind,
            target: Some(entity_id(target)),
        });
    }
}

/// Timers and cooldown for one tower. Returns the tower if it may attack.
fn tick_tower(world: &mut World, entity: Entity, expired: &mut Vec<TimerKind>) -> Option<Ready> {
    let (tower, pos, target, timers) = world
        .query_one_mut::<(&mut Tower, &Position, &TowerTarget, &mut Timers)>(entity)
        .ok()?;

    expired.clear();
    timers.tick(expired);
    if expired
        .iter()
        .any(|k| k.on_expiry() == ExpiryAction::RestoreFireRate)
    {
        tower.fire_rate_factor = 1.0;
    }

    tower.cooldown = tower.cooldown.saturating_sub(1);
    if timers.is_active(TimerKind::Disabled) || tower.cooldown > 0 {
        return None;
    }

    Some(Ready {
        tower: tower.clone(),
        position: pos.0,
        current: target.0,
    })
}
