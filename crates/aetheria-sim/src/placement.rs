//! Confirmed purchases: towers, plot unlocks, barricades, and upgrades.
//!
//! Each operation validates the location first and pays last, so a
//! rejected request never changes a balance. The check and the deduction
//! are a single `Economy` call.

use hecs::{Entity, World};
use thiserror::Error;

use aetheria_campaign::{Economy, EconomyError};
use aetheria_core::components::{Barricade, Tower};
use aetheria_core::constants::*;
use aetheria_core::enums::TowerKind;
use aetheria_core::events::GameEvent;
use aetheria_core::levels::Level;
use aetheria_core::stats::tower_stats;
use aetheria_core::Vec2;

use crate::relations::entity_id;
use crate::world_setup;

/// Why a placement, purchase, or upgrade was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no plot at that point")]
    NoPlot,
    #[error("no barricade spot at that point")]
    NoSpot,
    #[error("that location is already occupied")]
    Occupied,
    #[error("plot {0} is not owned")]
    NotOwned(usize),
    #[error("plot {0} is already owned")]
    AlreadyOwned(usize),
    #[error("no tower on that plot")]
    NoTower,
    #[error("tower is already at the maximum level")]
    MaxLevel,
    #[error("nothing is selected")]
    NoSelection,
    #[error("ability needs a target point")]
    MissingTarget,
    #[error("ability is already active")]
    AbilityActive,
    #[error("no run in progress")]
    NoRun,
    #[error(transparent)]
    Funds(#[from] EconomyError),
}

/// Tower standing on `plot`, if any.
fn tower_on_plot(world: &World, plot: usize) -> Option<Entity> {
    world
        .query::<&Tower>()
        .iter()
        .find(|(_, tower)| tower.plot == plot)
        .map(|(entity, _)| entity)
}

/// Build a tower of `kind` on the owned, empty plot at `point`.
pub fn place_tower(
    world: &mut World,
    level: &Level,
    owned_plots: &[bool],
    economy: &mut Economy,
    kind: TowerKind,
    point: Vec2,
    order: u64,
) -> Result<GameEvent, PlacementError> {
    let plot = level.plot_at(point).ok_or(PlacementError::NoPlot)?;
    if !owned_plots.get(plot).copied().unwrap_or(false) {
        return Err(PlacementError::NotOwned(plot));
    }
    if tower_on_plot(world, plot).is_some() {
        return Err(PlacementError::Occupied);
    }
    let position = level
        .all_plots()
        .nth(plot)
        .ok_or(PlacementError::NoPlot)?;

    economy.try_spend_persistent(tower_stats(kind).cost)?;
    let entity = world_setup::spawn_tower(world, kind, plot, position, order);
    Ok(GameEvent::TowerPlaced {
        id: entity_id(entity),
        kind,
        plot,
    })
}

/// Unlock the purchasable plot at `point`.
pub fn buy_plot(
    level: &Level,
    owned_plots: &mut [bool],
    economy: &mut Economy,
    point: Vec2,
) -> Result<GameEvent, PlacementError> {
    let plot = level.plot_at(point).ok_or(PlacementError::NoPlot)?;
    let owned = owned_plots.get_mut(plot).ok_or(PlacementError::NoPlot)?;
    if *owned {
        return Err(PlacementError::AlreadyOwned(plot));
    }
    economy.try_spend_persistent(PLOT_COST)?;
    *owned = true;
    Ok(GameEvent::PlotPurchased { plot })
}

/// Place a barricade on the free spot at `point`.
pub fn place_barricade(
    world: &mut World,
    level: &Level,
    economy: &mut Economy,
    point: Vec2,
    order: u64,
) -> Result<GameEvent, PlacementError> {
    let spot = level
        .barricade_spot_at(point)
        .ok_or(PlacementError::NoSpot)?;
    let taken = world
        .query::<&Barricade>()
        .iter()
        .any(|(_, b)| b.spot == spot);
    if taken {
        return Err(PlacementError::Occupied);
    }
    let position = level.barricade_spots[spot];

    economy.try_spend_volatile(BARRICADE_COST)?;
    let entity = world_setup::spawn_barricade(world, spot, position, order);
    Ok(GameEvent::BarricadePlaced {
        id: entity_id(entity),
        spot,
    })
}

/// Upgrade the tower standing on the plot at `point`.
pub fn upgrade_at(
    world: &mut World,
    level: &Level,
    economy: &mut Economy,
    point: Vec2,
) -> Result<GameEvent, PlacementError> {
    let plot = level.plot_at(point).ok_or(PlacementError::NoPlot)?;
    let entity = tower_on_plot(world, plot).ok_or(PlacementError::NoTower)?;
    let mut tower = world
        .get::<&mut Tower>(entity)
        .map_err(|_| PlacementError::NoTower)?;
    if tower.upgrade_level >= MAX_UPGRADE_LEVEL {
        return Err(PlacementError::MaxLevel);
    }

    let cost = tower.upgrade_cost;
    economy.try_spend_persistent(cost)?;
    apply_upgrade(&mut tower);
    Ok(GameEvent::TowerUpgraded {
        id: entity_id(entity),
        level: tower.upgrade_level,
        cost,
    })
}

/// Stat changes of one upgrade. Target and cooldown are untouched.
pub fn apply_upgrade(tower: &mut Tower) {
    tower.upgrade_level += 1;
    tower.damage *= UPGRADE_DAMAGE_FACTOR;
    tower.range *= UPGRADE_RANGE_FACTOR;
    tower.invested += tower.upgrade_cost;
    tower.upgrade_cost = (tower.upgrade_cost as f32 * UPGRADE_COST_FACTOR) as u32;
}
