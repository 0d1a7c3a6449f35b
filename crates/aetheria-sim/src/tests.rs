//! Tests for the simulation engine: determinism, commands, and run flow.

use aetheria_core::commands::PlayerCommand;
use aetheria_core::components::{Enemy, Tower};
use aetheria_core::constants::*;
use aetheria_core::enums::*;
use aetheria_core::events::GameEvent;
use aetheria_core::levels::Level;
use aetheria_core::state::GameStateSnapshot;
use aetheria_core::Vec2;

use crate::engine::{SimConfig, SimulationEngine};
use crate::relations::TowerTarget;

fn straight_level(length: f32, plots: Vec<Vec2>, starting_volatile: u32) -> Level {
    Level::custom(
        vec![Vec2::ZERO, Vec2::new(length, 0.0)],
        plots,
        vec![],
        starting_volatile,
    )
    .unwrap()
}

fn rejected(snap: &GameStateSnapshot) -> bool {
    snap.events
        .iter()
        .any(|e| matches!(e, GameEvent::PlacementRejected { .. }))
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    let setup = [
        PlayerCommand::StartRun {
            level: LevelId::Meadow,
        },
        PlayerCommand::SelectTower {
            kind: TowerKind::Storm,
        },
        PlayerCommand::PlaceAt {
            point: Vec2::new(100.0, 200.0),
        },
        PlayerCommand::SelectTower {
            kind: TowerKind::Frost,
        },
        PlayerCommand::PlaceAt {
            point: Vec2::new(500.0, 250.0),
        },
    ];
    engine_a.queue_commands(setup.clone());
    engine_b.queue_commands(setup);

    for _ in 0..1500 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

// ---- Session and commands ----

#[test]
fn test_start_run_loads_level() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::MainMenu);
    assert!(snap.level.is_none());

    engine.queue_command(PlayerCommand::StartRun {
        level: LevelId::Twilight,
    });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.economy.volatile, 200);
    assert_eq!(snap.economy.persistent, DEFAULT_PERSISTENT_CURRENCY);
    assert_eq!(snap.heartcrystal, HEARTCRYSTAL_MAX_HEALTH);
    assert_eq!(snap.plots.iter().filter(|p| p.owned).count(), 2);
    assert_eq!(snap.time.tick, 1);
}

#[test]
fn test_placement_before_run_is_rejected() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::PlaceAt {
        point: Vec2::new(100.0, 200.0),
    });
    assert!(rejected(&engine.tick()));
}

#[test]
fn test_pause_freezes_time() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.start_run_with_level(straight_level(500.0, vec![], 0));
    engine.tick();
    engine.queue_command(PlayerCommand::TogglePause);
    let paused = engine.tick();
    assert_eq!(paused.phase, GamePhase::Paused);
    let frozen = paused.time.tick;
    for _ in 0..10 {
        assert_eq!(engine.tick().time.tick, frozen);
    }
    engine.queue_command(PlayerCommand::TogglePause);
    assert_eq!(engine.tick().time.tick, frozen + 1);
}

#[test]
fn test_game_speed_steps_per_frame() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.start_run_with_level(straight_level(500.0, vec![], 0));

    engine.queue_command(PlayerCommand::SetGameSpeed { speed: 3 });
    assert_eq!(engine.tick().time.tick, 3);

    engine.queue_command(PlayerCommand::SetGameSpeed { speed: 99 });
    let snap = engine.tick();
    assert_eq!(snap.game_speed, MAX_GAME_SPEED);
    assert_eq!(snap.time.tick, 6);

    engine.queue_command(PlayerCommand::SetGameSpeed { speed: 0 });
    assert_eq!(engine.tick().time.tick, 7);
}

#[test]
fn test_selection_survives_a_miss_and_is_consumed_by_a_placement() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartRun {
            level: LevelId::Meadow,
        },
        PlayerCommand::SelectTower {
            kind: TowerKind::Sunfire,
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.selection, Some(Selection::Tower(TowerKind::Sunfire)));

    // Miss every plot: rejected, selection still armed, nothing paid.
    engine.queue_command(PlayerCommand::PlaceAt {
        point: Vec2::new(640.0, 700.0),
    });
    let snap = engine.tick();
    assert!(rejected(&snap));
    assert_eq!(snap.selection, Some(Selection::Tower(TowerKind::Sunfire)));
    assert_eq!(snap.economy.persistent, DEFAULT_PERSISTENT_CURRENCY);

    // The retry lands and consumes the selection.
    engine.queue_command(PlayerCommand::PlaceAt {
        point: Vec2::new(100.0, 200.0),
    });
    let snap = engine.tick();
    assert!(!rejected(&snap));
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.selection, None);

    // A further PlaceAt without a selection is rejected.
    engine.queue_command(PlayerCommand::PlaceAt {
        point: Vec2::new(100.0, 200.0),
    });
    let snap = engine.tick();
    assert!(rejected(&snap));
    assert_eq!(snap.towers.len(), 1);
}

#[test]
fn test_failed_placement_on_a_plot_consumes_the_selection() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartRun {
            level: LevelId::Meadow,
        },
        PlayerCommand::SelectTower {
            kind: TowerKind::Sunfire,
        },
        PlayerCommand::PlaceAt {
            point: Vec2::new(100.0, 200.0),
        },
        PlayerCommand::SelectTower {
            kind: TowerKind::Frost,
        },
        PlayerCommand::PlaceAt {
            point: Vec2::new(100.0, 200.0),
        },
    ]);
    let snap = engine.tick();
    // The second placement hit an occupied plot, which is not a miss.
    assert!(rejected(&snap));
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.selection, None);
}

#[test]
fn test_cancel_placement_has_no_side_effects() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartRun {
            level: LevelId::Meadow,
        },
        PlayerCommand::SelectBarricade,
        PlayerCommand::CancelPlacement,
        PlayerCommand::PlaceAt {
            point: Vec2::new(200.0, 150.0),
        },
    ]);
    let snap = engine.tick();
    assert!(snap.barricades.is_empty());
    assert_eq!(snap.economy.volatile, 300);
    assert_eq!(snap.selection, None);
}

#[test]
fn test_tower_plot_and_barricade_purchases() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartRun {
            level: LevelId::Meadow,
        },
        PlayerCommand::SelectPlotPurchase,
        PlayerCommand::PlaceAt {
            point: Vec2::new(300.0, 200.0),
        },
        PlayerCommand::SelectTower {
            kind: TowerKind::Sunfire,
        },
        PlayerCommand::PlaceAt {
            point: Vec2::new(300.0, 200.0),
        },
        PlayerCommand::SelectBarricade,
        PlayerCommand::PlaceAt {
            point: Vec2::new(200.0, 150.0),
        },
    ]);
    let snap = engine.tick();
    assert!(!rejected(&snap));
    assert_eq!(
        snap.economy.persistent,
        DEFAULT_PERSISTENT_CURRENCY - PLOT_COST - 100
    );
    assert_eq!(snap.economy.volatile, 300 - BARRICADE_COST);
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.towers[0].plot, 2);
    assert!(snap.plots[2].owned && snap.plots[2].occupied);
    assert_eq!(snap.barricades.len(), 1);
}

#[test]
fn test_upgrade_command() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartRun {
            level: LevelId::Meadow,
        },
        PlayerCommand::SelectTower {
            kind: TowerKind::Sunfire,
        },
        PlayerCommand::PlaceAt {
            point: Vec2::new(100.0, 200.0),
        },
        PlayerCommand::UpgradeAt {
            point: Vec2::new(100.0, 200.0),
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.towers[0].upgrade_level, 1);
    assert_eq!(snap.towers[0].upgrade_cost, 75);
    assert_eq!(snap.economy.persistent, DEFAULT_PERSISTENT_CURRENCY - 150);
}

#[test]
fn test_upgrade_keeps_target_and_cooldown() {
    let plot = Vec2::new(500.0, 60.0);
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.start_run_with_level(straight_level(2000.0, vec![plot], 0));
    engine.queue_commands([
        PlayerCommand::SelectTower {
            kind: TowerKind::Sunfire,
        },
        PlayerCommand::PlaceAt { point: plot },
    ]);
    engine.tick();
    let crawler = engine.spawn_enemy_at(EnemyKind::ShadowCrawler, Vec2::new(499.0, 0.0));

    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::TowerFired { .. })));
    let tower_state = |engine: &SimulationEngine| {
        let mut query = engine.world().query::<(&Tower, &TowerTarget)>();
        let (_, (tower, target)) = query.iter().next().unwrap();
        (tower.cooldown, target.0, tower.upgrade_level)
    };
    let (cooldown, target, _) = tower_state(&engine);
    assert_eq!(target, Some(crawler));

    engine.queue_command(PlayerCommand::UpgradeAt { point: plot });
    let snap = engine.tick();
    assert!(!rejected(&snap));
    let (after, after_target, level) = tower_state(&engine);
    assert_eq!(level, 1);
    // One step elapsed; the upgrade itself did not touch the cooldown.
    assert_eq!(after, cooldown - 1);
    assert_eq!(after_target, Some(crawler));

    // The next shot lands exactly when the cooldown runs out.
    for _ in 0..after - 1 {
        let snap = engine.tick();
        assert!(snap
            .events
            .iter()
            .all(|e| !matches!(e, GameEvent::EnemyHit { .. })));
    }
    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyHit { amount, .. } if *amount == 25.0 * UPGRADE_DAMAGE_FACTOR)));
}

#[test]
fn test_empower_cannot_be_rebought_while_active() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartRun {
            level: LevelId::Meadow,
        },
        PlayerCommand::ActivateAbility {
            kind: AbilityKind::Empower,
            target: None,
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.damage_multiplier, EMPOWER_MULTIPLIER);
    assert_eq!(snap.economy.volatile, 300 - EMPOWER_COST);

    engine.queue_command(PlayerCommand::ActivateAbility {
        kind: AbilityKind::Empower,
        target: None,
    });
    let snap = engine.tick();
    assert!(rejected(&snap));
    assert_eq!(snap.economy.volatile, 300 - EMPOWER_COST);

    for _ in 0..EMPOWER_DURATION_TICKS {
        engine.tick();
    }
    assert_eq!(engine.tick().damage_multiplier, 1.0);
}

#[test]
fn test_starfall_needs_a_target() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.start_run_with_level(straight_level(1000.0, vec![], 100));
    engine.queue_command(PlayerCommand::ActivateAbility {
        kind: AbilityKind::Starfall,
        target: None,
    });
    let snap = engine.tick();
    assert!(rejected(&snap));
    assert_eq!(snap.economy.volatile, 100);
}

#[test]
fn test_starfall_kill_is_credited_without_tower() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.start_run_with_level(straight_level(1000.0, vec![], STARFALL_COST));
    let flyer = engine.spawn_enemy_at(EnemyKind::ShadowFlyer, Vec2::new(500.0, 0.0));
    engine.queue_command(PlayerCommand::ActivateAbility {
        kind: AbilityKind::Starfall,
        target: Some(Vec2::new(500.0, 0.0)),
    });
    let snap = engine.tick();
    assert!(!engine.world().contains(flyer));
    assert_eq!(snap.economy.volatile, KILL_REWARD);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::EnemyDied { killer: None, .. }
    )));
}

#[test]
fn test_restart_resets_the_run() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartRun {
            level: LevelId::Spire,
        },
        PlayerCommand::SelectBarricade,
    ]);
    for _ in 0..400 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 1);
    assert_eq!(snap.wave.number, 0);
    assert_eq!(snap.selection, None);
    assert_eq!(snap.economy.volatile, 150);
    assert!(snap.enemies.is_empty());
}

// ---- Waves and end conditions ----

#[test]
fn test_first_wave_spawns_after_countdown() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.start_run_with_level(straight_level(5000.0, vec![], 0));

    for _ in 0..WAVE_COUNTDOWN_TICKS - 1 {
        let snap = engine.tick();
        assert!(snap.enemies.is_empty());
    }
    let snap = engine.tick();
    assert_eq!(snap.wave.number, 1);
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.enemies[0].position, Vec2::ZERO);
    assert_eq!(snap.wave.queued, 4);
}

#[test]
fn test_victory_after_final_wave() {
    let mut engine = SimulationEngine::new(SimConfig {
        final_wave: 1,
        ..Default::default()
    });
    let plot = Vec2::new(50.0, 50.0);
    engine.start_run_with_level(straight_level(5000.0, vec![plot], 0));
    engine.queue_commands([
        PlayerCommand::SelectTower {
            kind: TowerKind::Nova,
        },
        PlayerCommand::PlaceAt { point: plot },
    ]);
    engine.tick();
    for (_, tower) in engine.world_mut().query_mut::<&mut Tower>() {
        tower.damage = 1000.0;
        tower.fire_interval = 1;
    }

    let mut last = None;
    for _ in 0..2000 {
        let snap = engine.tick();
        if snap.phase.is_terminal() {
            last = Some(snap);
            break;
        }
    }
    let snap = last.expect("run should end");
    assert_eq!(snap.phase, GamePhase::Victory);
    assert_eq!(snap.heartcrystal, HEARTCRYSTAL_MAX_HEALTH);
    // Five kills at the fixed reward, converted at the full rate.
    assert_eq!(
        snap.economy.persistent,
        DEFAULT_PERSISTENT_CURRENCY - 125 + 5 * KILL_REWARD / 2
    );
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::RunEnded {
            outcome: RunOutcome::Victory,
            wave: 1
        }
    )));

    // A finished run ignores further steps.
    let frozen = snap.time.tick;
    assert_eq!(engine.tick().time.tick, frozen);
}

#[test]
fn test_defeat_when_heartcrystal_falls() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.start_run_with_level(straight_level(20.0, vec![], 0));
    for _ in 0..10 {
        engine.spawn_enemy_at(EnemyKind::ShadowCrawler, Vec2::new(15.0, 0.0));
    }

    let mut snap = engine.tick();
    while !snap.phase.is_terminal() {
        assert!(snap.time.tick < 20);
        snap = engine.tick();
    }
    assert_eq!(snap.phase, GamePhase::Defeat);
    assert_eq!(snap.heartcrystal, 0);
    assert_eq!(snap.economy.volatile, 0);
    assert_eq!(engine.world().query::<&Enemy>().iter().count(), 0);
}

#[test]
fn test_config_fills_missing_fields_with_defaults() {
    let config: SimConfig = serde_json::from_str(r#"{ "seed": 7, "final_wave": 3 }"#).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.final_wave, 3);
    assert_eq!(config.starting_persistent, DEFAULT_PERSISTENT_CURRENCY);
    assert_eq!(config.reward_policy, RewardPolicy::Fixed(KILL_REWARD));
}
