//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only work) plus the run state they need. Any system that can
//! remove entities iterates over a sorted snapshot of handles, never over
//! a live query.

use hecs::{Entity, World};

use aetheria_core::components::{Enemy, PlacementOrder, Position, SpawnOrder, Tower};
use aetheria_core::Vec2;

pub mod abilities;
pub mod barricades;
pub mod combat;
pub mod death;
pub mod movement;
pub mod snapshot;
pub mod status;
pub mod towers;
pub mod wave_spawner;

/// Enemy handles and positions in spawn order.
pub fn enemies_in_spawn_order(world: &World) -> Vec<(Entity, Vec2)> {
    let mut enemies: Vec<(SpawnOrder, Entity, Vec2)> = world
        .query::<(&Enemy, &SpawnOrder, &Position)>()
        .iter()
        .map(|(entity, (_enemy, order, pos))| (*order, entity, pos.0))
        .collect();
    enemies.sort_by_key(|&(order, _, _)| order);
    enemies
        .into_iter()
        .map(|(_, entity, pos)| (entity, pos))
        .collect()
}

/// Tower handles in placement order.
pub fn towers_in_placement_order(world: &World) -> Vec<Entity> {
    let mut towers: Vec<(PlacementOrder, Entity)> = world
        .query::<(&Tower, &PlacementOrder)>()
        .iter()
        .map(|(entity, (_tower, order))| (*order, entity))
        .collect();
    towers.sort_by_key(|&(order, _)| order);
    towers.into_iter().map(|(_, entity)| entity).collect()
}

/// Number of enemies present in the world.
pub fn live_enemy_count(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}
