//! Path following with barricade blocking and melee.
//!
//! Before moving, each enemy tests a lookahead point half its extent ahead
//! against the barricades in placement order. The first barricade whose
//! square contains the point blocks it. A blocked enemy does not move; it
//! hits the barricade every `ENEMY_ATTACK_INTERVAL_TICKS` instead.
//!
//! Enemies that reach the final waypoint are collected into `breaches` and
//! left in the world for the engine to commit.

use hecs::{Entity, World};

use aetheria_core::components::{Barricade, Melee, Mover, PlacementOrder, Position};
use aetheria_core::constants::*;
use aetheria_core::levels::Path;
use aetheria_core::types::Square;
use aetheria_core::Vec2;

/// Result of advancing along the path for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub position: Vec2,
    pub path_index: usize,
    pub reached_end: bool,
}

/// Move from `position` toward waypoint `path_index + 1` by at most `speed`.
/// Arrival (distance <= speed) snaps onto the waypoint and advances the
/// index. A zero-length segment counts as instant arrival.
pub fn advance(path: &Path, position: Vec2, path_index: usize, speed: f32) -> Step {
    let Some(target) = path.get(path_index + 1) else {
        return Step {
            position,
            path_index,
            reached_end: true,
        };
    };

    let delta = target - position;
    let distance = delta.length();
    if distance > speed {
        return Step {
            position: position + delta / distance * speed,
            path_index,
            reached_end: false,
        };
    }

    let path_index = path_index + 1;
    Step {
        position: target,
        path_index,
        reached_end: path_index >= path.last_index(),
    }
}

/// Point half an enemy extent ahead in the direction of travel.
fn lookahead(path: &Path, position: Vec2, path_index: usize) -> Vec2 {
    match path.get(path_index + 1) {
        Some(target) => position + (target - position).normalize_or_zero() * (ENEMY_SIZE * 0.5),
        None => position,
    }
}

/// Barricade handles and hit-boxes in placement order.
pub fn barricade_snapshot(world: &World) -> Vec<(Entity, Square)> {
    let mut barricades: Vec<(PlacementOrder, Entity, Square)> = world
        .query::<(&Barricade, &Position, &PlacementOrder)>()
        .iter()
        .map(|(entity, (_b, pos, order))| (*order, entity, Square::new(pos.0, BARRICADE_SIZE)))
        .collect();
    barricades.sort_by_key(|&(order, _, _)| order);
    barricades
        .into_iter()
        .map(|(_, entity, square)| (entity, square))
        .collect()
}

/// First barricade in the snapshot containing `point`.
pub fn first_blocker(barricades: &[(Entity, Square)], point: Vec2) -> Option<Entity> {
    barricades
        .iter()
        .find(|(_, square)| square.contains(point))
        .map(|&(entity, _)| entity)
}

/// Move every enemy one tick. Breaching enemies are pushed to `breaches`.
pub fn run(world: &mut World, path: &Path, breaches: &mut Vec<Entity>) {
    let barricades = barricade_snapshot(world);
    let enemies = super::enemies_in_spawn_order(world);

    for (entity, _) in enemies {
        let Ok((pos, mover, melee)) =
            world.query_one_mut::<(&mut Position, &mut Mover, &mut Melee)>(entity)
        else {
            continue;
        };

        let ahead = lookahead(path, pos.0, mover.path_index);
        let mut strike = None;
        match first_blocker(&barricades, ahead) {
            Some(barricade) => {
                melee.blocked = true;
                melee.attack_timer += 1;
                if melee.attack_timer >= ENEMY_ATTACK_INTERVAL_TICKS {
                    melee.attack_timer = 0;
                    strike = Some(barricade);
                }
            }
            None => {
                melee.blocked = false;
                melee.attack_timer = 0;
                let step = advance(path, pos.0, mover.path_index, mover.speed);
                pos.0 = step.position;
                mover.path_index = step.path_index;
                if step.reached_end {
                    breaches.push(entity);
                }
            }
        }

        if let Some(barricade) = strike {
            if let Ok(mut b) = world.get::<&mut Barricade>(barricade) {
                b.health -= ENEMY_MELEE_DAMAGE;
            }
        }
    }
}
