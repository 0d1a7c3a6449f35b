//! Components that point at other entities.
//!
//! They hold generation-checked `hecs::Entity` handles, never ownership.
//! A handle may outlive its entity; every reader checks `World::contains`
//! before use.

use hecs::{Entity, World};

/// Tower that landed the most recent hit on an enemy. `None` when the
/// last hit came from a player ability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastHitBy(pub Option<Entity>);

/// Current target of a tower.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TowerTarget(pub Option<Entity>);

/// Resolve a handle to a live entity.
pub fn live(world: &World, handle: Option<Entity>) -> Option<Entity> {
    handle.filter(|&e| world.contains(e))
}

/// Stable numeric id used in events and snapshots.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}
