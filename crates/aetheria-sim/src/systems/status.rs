//! Enemy status phase: timers, pulse abilities, and shield regeneration.
//!
//! Runs first in each step. Timers are processed per enemy in spawn order,
//! and within one enemy in `TimerKind` order. Pulses that fire are applied
//! after every enemy's timers have ticked, in the order they fired.

use hecs::{Entity, World};

use aetheria_core::components::{Enemy, Health, Mover, Position, Shield, Tower};
use aetheria_core::constants::*;
use aetheria_core::events::GameEvent;
use aetheria_core::timers::{ExpiryAction, TimerKind, Timers};
use aetheria_core::types::within_radius;
use aetheria_core::Vec2;

use crate::relations::entity_id;

enum Pulse {
    Heal { source: Entity, origin: Vec2 },
    Chrono { origin: Vec2 },
}

/// Tick every enemy's status timers and resolve the pulses that fire.
pub fn run(world: &mut World, events: &mut Vec<GameEvent>) {
    let enemies = super::enemies_in_spawn_order(world);
    let mut pulses = Vec::new();
    let mut expired = Vec::new();

    for &(entity, origin) in &enemies {
        let Ok((mover, shield, timers)) =
            world.query_one_mut::<(&mut Mover, Option<&mut Shield>, &mut Timers)>(entity)
        else {
            continue;
        };

        expired.clear();
        timers.tick(&mut expired);
        for kind in &expired {
            match kind.on_expiry() {
                ExpiryAction::RestoreSpeed => mover.speed = mover.base_speed,
                ExpiryAction::FireHealPulse => {
                    pulses.push(Pulse::Heal {
                        source: entity,
                        origin,
                    });
                    timers.set(TimerKind::PulseFlash, PULSE_FLASH_TICKS);
                }
                ExpiryAction::FireChronoPulse => {
                    pulses.push(Pulse::Chrono { origin });
                    timers.set(TimerKind::PulseFlash, PULSE_FLASH_TICKS);
                }
                ExpiryAction::RestoreFireRate | ExpiryAction::None => {}
            }
        }

        if let Some(shield) = shield {
            if !timers.is_active(TimerKind::ShieldCooldown) {
                shield.current = (shield.current + SHIELD_REGEN_PER_TICK).min(shield.max);
            }
        }
    }

    for pulse in pulses {
        match pulse {
            Pulse::Heal { source, origin } => heal_allies(world, source, origin, events),
            Pulse::Chrono { origin } => slow_towers(world, origin, events),
        }
    }
}

/// Restore health to every enemy near `origin`, the source included.
fn heal_allies(world: &mut World, source: Entity, origin: Vec2, events: &mut Vec<GameEvent>) {
    let mut healed = 0;
    for (_entity, (_enemy, pos, health)) in
        world.query_mut::<(&Enemy, &Position, &mut Health)>()
    {
        // Dead-but-present enemies wait for the death pass; never revive them.
        if health.current > 0.0 && within_radius(origin, pos.0, HEAL_PULSE_RADIUS) {
            health.current = (health.current + HEAL_PULSE_AMOUNT).min(health.max);
            healed += 1;
        }
    }
    events.push(GameEvent::EnemiesHealed {
        source: entity_id(source),
        healed,
    });
}

/// Slow the fire rate of every tower near `origin`.
fn slow_towers(world: &mut World, origin: Vec2, events: &mut Vec<GameEvent>) {
    for entity in super::towers_in_placement_order(world) {
        let Ok((tower, pos, timers)) =
            world.query_one_mut::<(&mut Tower, &Position, &mut Timers)>(entity)
        else {
            continue;
        };
        if within_radius(origin, pos.0, CHRONO_PULSE_RADIUS) {
            tower.fire_rate_factor = CHRONO_SLOW_FACTOR;
            timers.set(TimerKind::FireSlow, CHRONO_SLOW_TICKS);
            events.push(GameEvent::TowerSlowed {
                id: entity_id(entity),
                factor: CHRONO_SLOW_FACTOR,
                ticks: CHRONO_SLOW_TICKS,
            });
        }
    }
}
