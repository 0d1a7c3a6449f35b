//! Autopilot input collaborator.
//!
//! Stands in for a human player in the headless build. It reads the latest
//! snapshot and answers with player commands: build on free owned plots,
//! unlock another plot once everything is built, then sink spare persistent
//! currency into upgrades. Empower is used when the field gets crowded.
//!
//! Snapshots lag the commands by a frame or more, so the autopilot only
//! acts every `ACT_INTERVAL_TICKS`. A stale decision just produces a
//! rejected placement, which costs nothing.

use aetheria_core::commands::PlayerCommand;
use aetheria_core::constants::*;
use aetheria_core::enums::{AbilityKind, GamePhase, TowerKind};
use aetheria_core::state::GameStateSnapshot;
use aetheria_core::stats::tower_stats;

/// Minimum simulation ticks between two decisions.
pub const ACT_INTERVAL_TICKS: u64 = 30;

/// Live enemies needed before the autopilot spends on Empower.
const EMPOWER_CROWD: usize = 8;

#[derive(Debug, Default)]
pub struct Autopilot {
    last_acted: Option<u64>,
}

/// Tower to build on a plot. Cycles through every kind by plot index.
fn tower_for_plot(index: usize) -> TowerKind {
    TowerKind::ALL[index % TowerKind::ALL.len()]
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for this snapshot. Empty outside an active run or between
    /// decision intervals.
    pub fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        if snapshot.phase != GamePhase::Active {
            return Vec::new();
        }
        let tick = snapshot.time.tick;
        if self
            .last_acted
            .is_some_and(|last| tick < last + ACT_INTERVAL_TICKS)
        {
            return Vec::new();
        }
        self.last_acted = Some(tick);

        let mut commands = Vec::new();
        let mut budget = snapshot.economy.persistent;
        let mut built = false;

        for plot in snapshot.plots.iter().filter(|p| p.owned && !p.occupied) {
            let kind = tower_for_plot(plot.index);
            let cost = tower_stats(kind).cost;
            if cost <= budget {
                budget -= cost;
                built = true;
                commands.push(PlayerCommand::SelectTower { kind });
                commands.push(PlayerCommand::PlaceAt {
                    point: plot.position,
                });
            }
        }

        let all_built = snapshot.plots.iter().all(|p| !p.owned || p.occupied);
        if !built && all_built {
            let next_plot = snapshot.plots.iter().find(|p| !p.owned);
            let cheapest = TowerKind::ALL
                .iter()
                .map(|&k| tower_stats(k).cost)
                .min()
                .unwrap_or(0);
            match next_plot {
                Some(plot) if budget >= PLOT_COST + cheapest => {
                    commands.push(PlayerCommand::SelectPlotPurchase);
                    commands.push(PlayerCommand::PlaceAt {
                        point: plot.position,
                    });
                }
                _ => {
                    // Cheapest upgrade first keeps the defence even.
                    let upgrade = snapshot
                        .towers
                        .iter()
                        .filter(|t| t.upgrade_level < MAX_UPGRADE_LEVEL)
                        .filter(|t| t.upgrade_cost <= budget)
                        .min_by_key(|t| t.upgrade_cost);
                    if let Some(tower) = upgrade {
                        commands.push(PlayerCommand::UpgradeAt {
                            point: tower.position,
                        });
                    }
                }
            }
        }

        if snapshot.enemies.len() >= EMPOWER_CROWD
            && snapshot.damage_multiplier <= 1.0
            && snapshot.economy.volatile >= EMPOWER_COST
        {
            commands.push(PlayerCommand::ActivateAbility {
                kind: AbilityKind::Empower,
                target: None,
            });
        }

        commands
    }
}
