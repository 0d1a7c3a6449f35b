//! Barricade lifetime and removal.

use hecs::{Entity, World};

use aetheria_core::components::{Barricade, PlacementOrder};
use aetheria_core::events::GameEvent;

use crate::relations::entity_id;

/// Count down lifetimes, then remove every barricade whose health or
/// lifetime has run out. This is the only place barricades are removed.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<GameEvent>) {
    despawn_buffer.clear();

    let mut expired: Vec<(PlacementOrder, Entity, usize)> = Vec::new();
    for (entity, (barricade, order)) in world.query_mut::<(&mut Barricade, &PlacementOrder)>() {
        barricade.lifetime = barricade.lifetime.saturating_sub(1);
        if barricade.health <= 0.0 || barricade.lifetime == 0 {
            expired.push((*order, entity, barricade.spot));
        }
    }
    expired.sort_by_key(|&(order, _, _)| order);

    for (_, entity, spot) in expired {
        events.push(GameEvent::BarricadeDestroyed {
            id: entity_id(entity),
            spot,
        });
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
