//! Damage entry point and slow application.
//!
//! All damage to enemies goes through `take_damage`, whatever the source.
//! Nothing here removes entities: health may go to zero or below and the
//! death pass handles it later in the tick.

use hecs::{Entity, World};

use aetheria_core::components::{Health, Mover, Shield};
use aetheria_core::constants::SHIELD_COOLDOWN_TICKS;
use aetheria_core::enums::DamageSource;
use aetheria_core::events::GameEvent;
use aetheria_core::timers::{TimerKind, Timers};

use crate::relations::{entity_id, LastHitBy};

/// Apply `amount` damage to an enemy. The shield absorbs
/// `min(shield, amount)` and the rest comes off health, without clamping.
/// Every hit records its attacker (a tower, or `None` for abilities) and
/// restarts the shield cooldown.
///
/// Returns false if the entity is gone or the amount is not a positive
/// finite number.
pub fn take_damage(
    world: &mut World,
    enemy: Entity,
    amount: f32,
    source: DamageSource,
    attacker: Option<Entity>,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !(amount.is_finite() && amount > 0.0) {
        return false;
    }
    let Ok((health, shield, last_hit, timers)) = world.query_one_mut::<(
        &mut Health,
        Option<&mut Shield>,
        &mut LastHitBy,
        &mut Timers,
    )>(enemy) else {
        return false;
    };

    let mut remainder = amount;
    if let Some(shield) = shield {
        let absorbed = shield.current.min(remainder);
        shield.current -= absorbed;
        remainder -= absorbed;
        timers.set(TimerKind::ShieldCooldown, SHIELD_COOLDOWN_TICKS);
    }
    health.current -= remainder;
    last_hit.0 = attacker;

    events.push(GameEvent::EnemyHit {
        id: entity_id(enemy),
        amount,
        source,
    });
    true
}

/// Slow an enemy's movement. Reapplying overwrites factor and duration.
/// Speed is always derived from the unmodified base speed.
pub fn apply_slow(world: &mut World, enemy: Entity, factor: f32, ticks: u32) -> bool {
    let Ok((mover, timers)) = world.query_one_mut::<(&mut Mover, &mut Timers)>(enemy) else {
        return false;
    };
    if ticks == 0 {
        return false;
    }
    mover.speed = mover.base_speed * factor;
    timers.set(TimerKind::Slow, ticks);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use aetheria_core::enums::EnemyKind;
    use aetheria_core::Vec2;

    use crate::world_setup::spawn_enemy;

    fn set_shield(world: &mut World, e: Entity, shield: f32, health: f32) {
        world.get::<&mut Shield>(e).unwrap().current = shield;
        world.get::<&mut Health>(e).unwrap().current = health;
    }

    #[test]
    fn shield_absorbs_before_health() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, EnemyKind::ShieldingSentinel, Vec2::ZERO, 0);
        set_shield(&mut world, e, 20.0, 50.0);
        let mut events = Vec::new();

        assert!(take_damage(
            &mut world,
            e,
            35.0,
            DamageSource::Tower(1),
            None,
            &mut events
        ));
        assert_eq!(world.get::<&Shield>(e).unwrap().current, 0.0);
        assert_eq!(world.get::<&Health>(e).unwrap().current, 35.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn fully_absorbed_hit_still_resets_cooldown() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, EnemyKind::ShieldingSentinel, Vec2::ZERO, 0);
        let mut events = Vec::new();

        take_damage(
            &mut world,
            e,
            5.0,
            DamageSource::Tower(1),
            None,
            &mut events,
        );
        assert_eq!(world.get::<&Shield>(e).unwrap().current, 45.0);
        assert_eq!(world.get::<&Health>(e).unwrap().current, 150.0);
        assert_eq!(
            world
                .get::<&Timers>(e)
                .unwrap()
                .remaining(TimerKind::ShieldCooldown),
            SHIELD_COOLDOWN_TICKS
        );
    }

    #[test]
    fn health_goes_negative_without_clamping() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, EnemyKind::ShadowFlyer, Vec2::ZERO, 0);
        let mut events = Vec::new();

        take_damage(
            &mut world,
            e,
            100.0,
            DamageSource::Tower(1),
            None,
            &mut events,
        );
        assert_eq!(world.get::<&Health>(e).unwrap().current, -40.0);
    }

    #[test]
    fn records_last_attacker() {
        let mut world = World::new();
        let tower = world.spawn(());
        let e = spawn_enemy(&mut world, EnemyKind::Saboteur, Vec2::ZERO, 0);
        let mut events = Vec::new();

        take_damage(
            &mut world,
            e,
            1.0,
            DamageSource::Tower(entity_id(tower)),
            Some(tower),
            &mut events,
        );
        assert_eq!(world.get::<&LastHitBy>(e).unwrap().0, Some(tower));
    }

    #[test]
    fn non_positive_damage_is_ignored() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, EnemyKind::ShadowCrawler, Vec2::ZERO, 0);
        let mut events = Vec::new();

        assert!(!take_damage(
            &mut world,
            e,
            0.0,
            DamageSource::Tower(1),
            None,
            &mut events
        ));
        assert!(events.is_empty());
    }

    #[test]
    fn slow_does_not_stack() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, EnemyKind::ShadowFlyer, Vec2::ZERO, 0);

        apply_slow(&mut world, e, 0.5, 10);
        apply_slow(&mut world, e, 0.5, 10);
        assert_eq!(world.get::<&Mover>(e).unwrap().speed, 1.0);
    }
}
