//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use aetheria_campaign::Economy;
use aetheria_core::commands::PlayerCommand;
use aetheria_core::constants::*;
use aetheria_core::enums::*;
use aetheria_core::events::GameEvent;
use aetheria_core::levels::Level;
use aetheria_core::state::GameStateSnapshot;
use aetheria_core::types::SimTime;
use aetheria_core::Vec2;

use crate::placement::{self, PlacementError};
use crate::relations::entity_id;
use crate::systems;
use crate::systems::abilities::AbilityState;
use crate::systems::wave_spawner::{SpawnContext, WaveState};
use crate::world_setup;

/// Configuration for a simulation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Persistent balance at session start (from the persistence store).
    pub starting_persistent: u32,
    /// How kills are credited.
    pub reward_policy: RewardPolicy,
    /// Clearing this wave wins a run.
    pub final_wave: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_persistent: DEFAULT_PERSISTENT_CURRENCY,
            reward_policy: RewardPolicy::default(),
            final_wave: FINAL_WAVE,
        }
    }
}

/// State scoped to one run on one level.
#[derive(Debug, Clone)]
pub struct RunState {
    pub level: Level,
    pub waves: WaveState,
    pub heartcrystal: i32,
    pub abilities: AbilityState,
    /// Ownership per plot index, initial plots first.
    pub owned_plots: Vec<bool>,
    /// Armed placement awaiting `PlaceAt`.
    pub selection: Option<Selection>,
}

impl RunState {
    fn new(level: Level) -> Self {
        let owned_plots = (0..level.all_plots().count())
            .map(|i| level.is_initial_plot(i))
            .collect();
        Self {
            level,
            waves: WaveState::default(),
            heartcrystal: HEARTCRYSTAL_MAX_HEALTH,
            abilities: AbilityState::default(),
            owned_plots,
            selection: None,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    breach_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    economy: Economy,
    run: Option<RunState>,
    game_speed: u32,
    next_spawn_order: u64,
    next_placement_order: u64,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            economy: Economy::new(config.starting_persistent, 0),
            config,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            breach_buffer: Vec::new(),
            events: Vec::new(),
            run: None,
            game_speed: 1,
            next_spawn_order: 0,
            next_placement_order: 0,
        }
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one frame and return the resulting snapshot. A frame applies
    /// every queued command, then runs `game_speed` simulation steps while
    /// the run is active.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();
        // Kills dealt by commands (Starfall) are committed before any step.
        if self.run.is_some() {
            self.commit_deaths();
        }

        for _ in 0..self.game_speed {
            if self.phase != GamePhase::Active {
                break;
            }
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.run.as_ref(),
            &self.economy,
            self.config.final_wave,
            self.game_speed,
            events,
        )
    }

    /// Start a run on an arbitrary level, bypassing `StartRun`.
    pub fn start_run_with_level(&mut self, level: Level) {
        self.world.clear();
        self.time = SimTime::default();
        self.next_spawn_order = 0;
        self.next_placement_order = 0;
        self.game_speed = 1;
        self.economy.reset_run(level.starting_volatile);
        info!(level = %level.name, volatile = level.starting_volatile, "run started");
        self.run = Some(RunState::new(level));
        self.phase = GamePhase::Active;
    }

    /// Spawn an enemy outside the wave schedule (scenario setup, tooling).
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, position: Vec2) -> Entity {
        let order = self.next_spawn_order;
        self.next_spawn_order += 1;
        world_setup::spawn_enemy(&mut self.world, kind, position, order)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn game_speed(&self) -> u32 {
        self.game_speed
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    /// Run-scoped state, if a run has been started.
    pub fn run(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the ECS world for scenario setup.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn in_run(&self) -> bool {
        matches!(self.phase, GamePhase::Active | GamePhase::Paused)
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun { level } => {
                if self.in_run() {
                    return;
                }
                match Level::load(level) {
                    Ok(level) => self.start_run_with_level(level),
                    Err(err) => warn!(?level, %err, "level failed to load"),
                }
            }
            PlayerCommand::Restart => {
                if let Some(level) = self.run.as_ref().map(|r| r.level.clone()) {
                    self.start_run_with_level(level);
                }
            }
            PlayerCommand::SelectTower { kind } => self.select(Selection::Tower(kind)),
            PlayerCommand::SelectBarricade => self.select(Selection::Barricade),
            PlayerCommand::SelectPlotPurchase => self.select(Selection::PlotPurchase),
            PlayerCommand::CancelPlacement => {
                if let Some(run) = self.run.as_mut() {
                    run.selection = None;
                }
            }
            PlayerCommand::PlaceAt { point } => {
                let result = self.place_at(point);
                self.record(result);
            }
            PlayerCommand::UpgradeAt { point } => {
                let result = self.upgrade_at(point);
                self.record(result);
            }
            PlayerCommand::ActivateAbility { kind, target } => {
                let result = self.activate_ability(kind, target);
                self.record(result);
            }
            PlayerCommand::TogglePause => {
                self.phase = match self.phase {
                    GamePhase::Active => GamePhase::Paused,
                    GamePhase::Paused => GamePhase::Active,
                    other => other,
                };
            }
            PlayerCommand::SetGameSpeed { speed } => {
                self.game_speed = speed.clamp(1, MAX_GAME_SPEED);
            }
        }
    }

    fn select(&mut self, selection: Selection) {
        if !self.in_run() {
            return;
        }
        if let Some(run) = self.run.as_mut() {
            run.selection = Some(selection);
        }
    }

    /// Confirm the armed selection at `point`. A click that hits no plot or
    /// spot keeps the selection armed; any other outcome consumes it.
    fn place_at(&mut self, point: Vec2) -> Result<GameEvent, PlacementError> {
        if !self.in_run() {
            return Err(PlacementError::NoRun);
        }
        let run = self.run.as_mut().ok_or(PlacementError::NoRun)?;
        let selection = run.selection.take().ok_or(PlacementError::NoSelection)?;

        let order = self.next_placement_order;
        let result = match selection {
            Selection::Tower(kind) => placement::place_tower(
                &mut self.world,
                &run.level,
                &run.owned_plots,
                &mut self.economy,
                kind,
                point,
                order,
            ),
            Selection::Barricade => placement::place_barricade(
                &mut self.world,
                &run.level,
                &mut self.economy,
                point,
                order,
            ),
            Selection::PlotPurchase => placement::buy_plot(
                &run.level,
                &mut run.owned_plots,
                &mut self.economy,
                point,
            ),
        };

        match &result {
            Err(PlacementError::NoPlot | PlacementError::NoSpot) => {
                run.selection = Some(selection);
            }
            Ok(_) if selection != Selection::PlotPurchase => {
                self.next_placement_order += 1;
            }
            _ => {}
        }
        result
    }

    fn upgrade_at(&mut self, point: Vec2) -> Result<GameEvent, PlacementError> {
        if !self.in_run() {
            return Err(PlacementError::NoRun);
        }
        let run = self.run.as_ref().ok_or(PlacementError::NoRun)?;
        placement::upgrade_at(&mut self.world, &run.level, &mut self.economy, point)
    }

    fn activate_ability(
        &mut self,
        kind: AbilityKind,
        target: Option<Vec2>,
    ) -> Result<GameEvent, PlacementError> {
        if !self.in_run() {
            return Err(PlacementError::NoRun);
        }
        let run = self.run.as_mut().ok_or(PlacementError::NoRun)?;
        let cost = systems::abilities::ability_cost(kind);

        match kind {
            AbilityKind::Empower => {
                if run.abilities.empower_active() {
                    return Err(PlacementError::AbilityActive);
                }
                self.economy.try_spend_volatile(cost)?;
                run.abilities.start_empower();
            }
            AbilityKind::Starfall => {
                let point = target.ok_or(PlacementError::MissingTarget)?;
                self.economy.try_spend_volatile(cost)?;
                systems::abilities::starfall(&mut self.world, point, &mut self.events);
            }
        }
        Ok(GameEvent::AbilityActivated { kind, target })
    }

    /// Turn a command outcome into an event.
    fn record(&mut self, result: Result<GameEvent, PlacementError>) {
        match result {
            Ok(event) => self.events.push(event),
            Err(err) => {
                debug!(%err, "request rejected");
                self.events.push(GameEvent::PlacementRejected {
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Credit and remove every enemy at or below zero health.
    fn commit_deaths(&mut self) {
        systems::death::run(
            &mut self.world,
            &mut self.economy,
            self.config.reward_policy,
            &mut self.despawn_buffer,
            &mut self.events,
        );
    }

    /// Run one simulation step: every phase in order.
    fn run_systems(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let path = Arc::clone(&run.level.path);

        // 1. Enemy status (timers, pulses, shield regeneration)
        systems::status::run(&mut self.world, &mut self.events);

        // 2. Movement with blocking and melee, then commit breaches
        self.breach_buffer.clear();
        systems::movement::run(&mut self.world, &path, &mut self.breach_buffer);
        for entity in self.breach_buffer.drain(..) {
            run.heartcrystal -= HEARTCRYSTAL_BREACH_DAMAGE;
            run.waves.breached = true;
            self.events.push(GameEvent::HeartcrystalBreached {
                id: entity_id(entity),
                damage: HEARTCRYSTAL_BREACH_DAMAGE,
                remaining: run.heartcrystal,
            });
            let _ = self.world.despawn(entity);
        }

        // 3. Barricade lifetime, then commit removals
        systems::barricades::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);

        // 4. Ability multiplier countdown
        run.abilities.tick();

        // 5. Towers
        systems::towers::run(
            &mut self.world,
            run.abilities.damage_multiplier(),
            &mut self.events,
        );

        // 6. Death pass
        systems::death::run(
            &mut self.world,
            &mut self.economy,
            self.config.reward_policy,
            &mut self.despawn_buffer,
            &mut self.events,
        );

        // 7. Waves and wave-clear conversion
        let cleared = systems::wave_spawner::run(
            &mut self.world,
            &mut run.waves,
            &path,
            self.config.final_wave,
            SpawnContext {
                rng: &mut self.rng,
                economy: &mut self.economy,
                next_spawn_order: &mut self.next_spawn_order,
                events: &mut self.events,
            },
        );

        // 8. End conditions; defeat wins a tie
        let outcome = if run.heartcrystal <= 0 {
            Some(RunOutcome::Defeat)
        } else if cleared.is_some_and(|wave| wave >= self.config.final_wave) {
            Some(RunOutcome::Victory)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            self.phase = match outcome {
                RunOutcome::Victory => GamePhase::Victory,
                RunOutcome::Defeat => GamePhase::Defeat,
            };
            run.selection = None;
            info!(?outcome, wave = run.waves.number, "run ended");
            self.events.push(GameEvent::RunEnded {
                outcome,
                wave: run.waves.number,
            });
        }
    }
}
