//! Wave spawning and wave-clear conversion.
//!
//! Between waves a countdown runs. When it reaches zero the next wave is
//! composed and shuffled, then spawned one enemy per interval at the first
//! waypoint. A wave is cleared once its queue is empty and no enemy is
//! left; the volatile balance is then converted and the countdown restarts.

use std::collections::VecDeque;

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use aetheria_campaign::{get_wave, Economy};
use aetheria_core::constants::{SPAWN_INTERVAL_TICKS, WAVE_COUNTDOWN_TICKS};
use aetheria_core::enums::EnemyKind;
use aetheria_core::events::GameEvent;
use aetheria_core::levels::Path;

use crate::relations::entity_id;
use crate::world_setup;

/// Wave progress for the current run.
#[derive(Debug, Clone)]
pub struct WaveState {
    /// Current wave number; 0 before the first wave.
    pub number: u32,
    /// Ticks until the next wave starts.
    pub countdown: u32,
    /// Enemies still to spawn in the current wave.
    pub queue: VecDeque<EnemyKind>,
    /// Ticks until the next spawn.
    pub spawn_timer: u32,
    /// Whether a wave is running.
    pub in_progress: bool,
    /// Whether the heartcrystal was breached during the current wave.
    pub breached: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            number: 0,
            countdown: WAVE_COUNTDOWN_TICKS,
            queue: VecDeque::new(),
            spawn_timer: 0,
            in_progress: false,
            breached: false,
        }
    }
}

/// Mutable run resources the spawner needs besides the world.
pub struct SpawnContext<'a> {
    pub rng: &'a mut ChaCha8Rng,
    pub economy: &'a mut Economy,
    pub next_spawn_order: &'a mut u64,
    pub events: &'a mut Vec<GameEvent>,
}

/// Advance the wave state by one tick. Returns the wave number if a wave
/// was cleared this tick.
pub fn run(
    world: &mut World,
    state: &mut WaveState,
    path: &Path,
    final_wave: u32,
    ctx: SpawnContext<'_>,
) -> Option<u32> {
    if !state.in_progress {
        if state.number >= final_wave {
            return None;
        }
        state.countdown = state.countdown.saturating_sub(1);
        if state.countdown > 0 {
            return None;
        }
        state.number += 1;
        state.queue = get_wave(state.number, ctx.rng).into();
        state.spawn_timer = 0;
        state.in_progress = true;
        info!(wave = state.number, enemies = state.queue.len(), "wave started");
        ctx.events.push(GameEvent::WaveStarted {
            wave: state.number,
            enemies: state.queue.len() as u32,
        });
    }

    if state.spawn_timer == 0 {
        if let Some(kind) = state.queue.pop_front() {
            let order = *ctx.next_spawn_order;
            *ctx.next_spawn_order += 1;
            let entity = world_setup::spawn_enemy(world, kind, path.start(), order);
            ctx.events.push(GameEvent::EnemySpawned {
                id: entity_id(entity),
                kind,
                wave: state.number,
            });
            state.spawn_timer = SPAWN_INTERVAL_TICKS;
        }
    }
    state.spawn_timer = state.spawn_timer.saturating_sub(1);

    if state.queue.is_empty() && super::live_enemy_count(world) == 0 {
        let converted = ctx.economy.convert_wave(state.breached);
        info!(
            wave = state.number,
            converted,
            breached = state.breached,
            "wave cleared"
        );
        ctx.events.push(GameEvent::WaveCleared {
            wave: state.number,
            converted,
            breached: state.breached,
        });
        state.breached = false;
        state.in_progress = false;
        state.countdown = WAVE_COUNTDOWN_TICKS;
        return Some(state.number);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use aetheria_core::Vec2;
    use rand::SeedableRng;

    fn path() -> Path {
        Path::new(vec![Vec2::ZERO, Vec2::new(1000.0, 0.0)]).unwrap()
    }

    struct Fixture {
        rng: ChaCha8Rng,
        economy: Economy,
        order: u64,
        events: Vec<GameEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                rng: ChaCha8Rng::seed_from_u64(1),
                economy: Economy::new(0, 100),
                order: 0,
                events: Vec::new(),
            }
        }

        fn step(&mut self, world: &mut World, state: &mut WaveState) -> Option<u32> {
            run(
                world,
                state,
                &path(),
                10,
                SpawnContext {
                    rng: &mut self.rng,
                    economy: &mut self.economy,
                    next_spawn_order: &mut self.order,
                    events: &mut self.events,
                },
            )
        }
    }

    #[test]
    fn first_wave_starts_after_countdown_and_spawns_at_interval() {
        let mut world = World::new();
        let mut state = WaveState::default();
        let mut fx = Fixture::new();

        for _ in 0..WAVE_COUNTDOWN_TICKS - 1 {
            fx.step(&mut world, &mut state);
        }
        assert_eq!(state.number, 0);
        fx.step(&mut world, &mut state);
        assert_eq!(state.number, 1);
        assert_eq!(super::super::live_enemy_count(&world), 1);

        for _ in 0..SPAWN_INTERVAL_TICKS - 1 {
            fx.step(&mut world, &mut state);
        }
        assert_eq!(super::super::live_enemy_count(&world), 1);
        fx.step(&mut world, &mut state);
        assert_eq!(super::super::live_enemy_count(&world), 2);
        assert_eq!(fx.order, 2);
    }

    #[test]
    fn clears_when_queue_and_field_are_empty() {
        let mut world = World::new();
        let mut state = WaveState {
            number: 1,
            in_progress: true,
            breached: true,
            ..Default::default()
        };
        let mut fx = Fixture::new();

        assert_eq!(fx.step(&mut world, &mut state), Some(1));
        assert_eq!(fx.economy.persistent(), 25);
        assert_eq!(fx.economy.volatile(), 0);
        assert!(!state.breached);
        assert!(!state.in_progress);
        assert_eq!(state.countdown, WAVE_COUNTDOWN_TICKS);
    }

    #[test]
    fn no_new_wave_after_final() {
        let mut world = World::new();
        let mut state = WaveState {
            number: 10,
            countdown: 1,
            ..Default::default()
        };
        let mut fx = Fixture::new();

        assert_eq!(fx.step(&mut world, &mut state), None);
        assert_eq!(state.number, 10);
        assert!(fx.events.is_empty());
    }
}
