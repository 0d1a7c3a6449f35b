//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only; it never modifies the world.

use std::collections::HashSet;

use hecs::World;

use aetheria_campaign::Economy;
use aetheria_core::components::*;
use aetheria_core::enums::*;
use aetheria_core::events::GameEvent;
use aetheria_core::state::*;
use aetheria_core::timers::{TimerKind, Timers};
use aetheria_core::types::SimTime;

use crate::engine::RunState;
use crate::relations::{entity_id, live, TowerTarget};

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    run: Option<&RunState>,
    economy: &Economy,
    final_wave: u32,
    game_speed: u32,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        level: run.map(build_level),
        wave: run.map_or_else(WaveView::default, |r| WaveView {
            number: r.waves.number,
            final_wave,
            queued: r.waves.queue.len() as u32,
            countdown: if r.waves.in_progress {
                0
            } else {
                r.waves.countdown
            },
            breached: r.waves.breached,
        }),
        heartcrystal: run.map_or(0, |r| r.heartcrystal),
        economy: EconomyView {
            persistent: economy.persistent(),
            volatile: economy.volatile(),
        },
        damage_multiplier: run.map_or(1.0, |r| r.abilities.damage_multiplier()),
        game_speed,
        selection: run.and_then(|r| r.selection),
        enemies: build_enemies(world),
        towers: build_towers(world),
        barricades: build_barricades(world),
        plots: run.map_or_else(Vec::new, |r| build_plots(world, r)),
        events,
    }
}

fn build_level(run: &RunState) -> LevelView {
    LevelView {
        id: run.level.id,
        name: run.level.name.clone(),
        difficulty: run.level.difficulty.clone(),
        path: run.level.path.waypoints().to_vec(),
        barricade_spots: run.level.barricade_spots.clone(),
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(SpawnOrder, EnemyView)> = world
        .query::<(
            &Enemy,
            &SpawnOrder,
            &Position,
            &Health,
            Option<&Shield>,
            &Melee,
            &Timers,
        )>()
        .iter()
        .map(|(entity, (enemy, order, pos, health, shield, melee, timers))| {
            let visual = if timers.is_active(TimerKind::PulseFlash) {
                VisualState::Pulsing
            } else if melee.blocked {
                VisualState::Blocked
            } else if timers.is_active(TimerKind::Slow) {
                VisualState::Slowed
            } else {
                VisualState::Normal
            };
            (
                *order,
                EnemyView {
                    id: entity_id(entity),
                    kind: enemy.kind,
                    position: pos.0,
                    health: health.current,
                    max_health: health.max,
                    shield: shield.map(|s| s.current),
                    visual,
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(order, _)| *order);
    enemies.into_iter().map(|(_, view)| view).collect()
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<(PlacementOrder, TowerView)> = world
        .query::<(&Tower, &PlacementOrder, &Position, &TowerTarget, &Timers)>()
        .iter()
        .map(|(entity, (tower, order, pos, target, timers))| {
            let visual = if timers.is_active(TimerKind::Disabled) {
                VisualState::Disabled
            } else if timers.is_active(TimerKind::Vfx) {
                VisualState::Firing
            } else if timers.is_active(TimerKind::FireSlow) {
                VisualState::Slowed
            } else {
                VisualState::Normal
            };
            let target_position = live(world, target.0)
                .and_then(|t| world.get::<&Position>(t).ok().map(|p| p.0));
            (
                *order,
                TowerView {
                    id: entity_id(entity),
                    kind: tower.kind,
                    plot: tower.plot,
                    position: pos.0,
                    upgrade_level: tower.upgrade_level,
                    upgrade_cost: tower.upgrade_cost,
                    range: tower.range,
                    damage: tower.damage,
                    target_position,
                    visual,
                },
            )
        })
        .collect();
    towers.sort_by_key(|(order, _)| *order);
    towers.into_iter().map(|(_, view)| view).collect()
}

fn build_barricades(world: &World) -> Vec<BarricadeView> {
    let mut barricades: Vec<(PlacementOrder, BarricadeView)> = world
        .query::<(&Barricade, &PlacementOrder, &Position)>()
        .iter()
        .map(|(entity, (barricade, order, pos))| {
            (
                *order,
                BarricadeView {
                    id: entity_id(entity),
                    spot: barricade.spot,
                    position: pos.0,
                    health: barricade.health,
                    max_health: barricade.max_health,
                    lifetime: barricade.lifetime,
                },
            )
        })
        .collect();
    barricades.sort_by_key(|(order, _)| *order);
    barricades.into_iter().map(|(_, view)| view).collect()
}

fn build_plots(world: &World, run: &RunState) -> Vec<PlotView> {
    let occupied: HashSet<usize> = world
        .query::<&Tower>()
        .iter()
        .map(|(_, tower)| tower.plot)
        .collect();
    run.level
        .all_plots()
        .enumerate()
        .map(|(index, position)| PlotView {
            index,
            position,
            owned: run.owned_plots.get(index).copied().unwrap_or(false),
            occupied: occupied.contains(&index),
        })
        .collect()
}
