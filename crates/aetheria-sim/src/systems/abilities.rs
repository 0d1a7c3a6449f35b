//! Player abilities: the Empower damage multiplier and the Starfall strike.

use hecs::World;

use aetheria_core::constants::*;
use aetheria_core::enums::{AbilityKind, DamageSource};
use aetheria_core::events::GameEvent;
use aetheria_core::types::within_radius;
use aetheria_core::Vec2;

use super::combat::take_damage;

/// Run-scoped ability state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityState {
    /// Ticks of Empower left.
    pub empower_remaining: u32,
}

impl AbilityState {
    pub fn empower_active(&self) -> bool {
        self.empower_remaining > 0
    }

    /// Global damage multiplier handed to the tower phase.
    pub fn damage_multiplier(&self) -> f32 {
        if self.empower_active() {
            EMPOWER_MULTIPLIER
        } else {
            1.0
        }
    }

    pub fn start_empower(&mut self) {
        self.empower_remaining = EMPOWER_DURATION_TICKS;
    }

    /// Count the multiplier down by one tick.
    pub fn tick(&mut self) {
        self.empower_remaining = self.empower_remaining.saturating_sub(1);
    }
}

/// Volatile cost of an ability.
pub fn ability_cost(kind: AbilityKind) -> u32 {
    match kind {
        AbilityKind::Empower => EMPOWER_COST,
        AbilityKind::Starfall => STARFALL_COST,
    }
}

/// Damage every enemy within the Starfall radius of `point`. Returns the
/// number of enemies hit.
pub fn starfall(world: &mut World, point: Vec2, events: &mut Vec<GameEvent>) -> usize {
    let mut hits = 0;
    for (entity, pos) in super::enemies_in_spawn_order(world) {
        if within_radius(point, pos, STARFALL_RADIUS)
            && take_damage(
                world,
                entity,
                STARFALL_DAMAGE,
                DamageSource::Ability(AbilityKind::Starfall),
                None,
                events,
            )
        {
            hits += 1;
        }
    }
    hits
}
