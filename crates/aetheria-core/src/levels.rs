//! Level topology: path waypoints, tower plots, and barricade spots.
//!
//! A `Level` is immutable for the duration of a run. The path is shared
//! by reference between the engine and every spawned enemy.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{BARRICADE_SIZE, PLOT_SIZE};
use crate::enums::LevelId;
use crate::types::Square;

/// Problems with a level definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("path needs at least two waypoints, got {0}")]
    PathTooShort(usize),
    #[error("waypoint {0} is not a finite coordinate")]
    NonFiniteWaypoint(usize),
}

/// Ordered waypoints from spawn to the heartcrystal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Path {
    pub fn new(waypoints: Vec<Vec2>) -> Result<Self, LevelError> {
        if waypoints.len() < 2 {
            return Err(LevelError::PathTooShort(waypoints.len()));
        }
        if let Some(i) = waypoints.iter().position(|w| !w.is_finite()) {
            return Err(LevelError::NonFiniteWaypoint(i));
        }
        Ok(Self { waypoints })
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Spawn point.
    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    /// Index of the final waypoint.
    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.waypoints.get(index).copied()
    }
}

/// Everything the simulation needs to know about a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    pub difficulty: String,
    pub starting_volatile: u32,
    pub path: Arc<Path>,
    /// Plots available for free at the start of a run.
    pub initial_plots: Vec<Vec2>,
    /// Plots that must be unlocked with persistent currency.
    pub purchasable_plots: Vec<Vec2>,
    pub barricade_spots: Vec<Vec2>,
}

impl Level {
    /// Build one of the built-in maps.
    pub fn load(id: LevelId) -> Result<Self, LevelError> {
        let (name, difficulty, starting_volatile, path, initial, purchasable, spots) = match id {
            LevelId::Meadow => (
                "Level 1",
                "Easy",
                300,
                vec![
                    (0.0, 100.0),
                    (200.0, 100.0),
                    (200.0, 300.0),
                    (400.0, 300.0),
                    (400.0, 100.0),
                    (600.0, 100.0),
                    (600.0, 400.0),
                    (800.0, 400.0),
                    (800.0, 200.0),
                    (1000.0, 200.0),
                    (1000.0, 500.0),
                    (1280.0, 500.0),
                ],
                vec![(100.0, 200.0), (500.0, 250.0)],
                vec![(300.0, 200.0), (700.0, 300.0), (900.0, 350.0)],
                vec![
                    (200.0, 150.0),
                    (400.0, 250.0),
                    (600.0, 200.0),
                    (800.0, 300.0),
                    (1000.0, 350.0),
                ],
            ),
            LevelId::Twilight => (
                "Level 2",
                "Normal",
                200,
                vec![
                    (0.0, 360.0),
                    (150.0, 360.0),
                    (150.0, 150.0),
                    (400.0, 150.0),
                    (400.0, 500.0),
                    (700.0, 500.0),
                    (700.0, 250.0),
                    (1000.0, 250.0),
                    (1000.0, 600.0),
                    (1280.0, 600.0),
                ],
                vec![(100.0, 250.0), (550.0, 350.0)],
                vec![(300.0, 300.0), (850.0, 400.0), (1100.0, 450.0)],
                vec![
                    (150.0, 250.0),
                    (400.0, 300.0),
                    (700.0, 400.0),
                    (1000.0, 400.0),
                ],
            ),
            LevelId::Spire => (
                "Level 3",
                "Hard",
                150,
                vec![(0.0, 50.0), (1280.0, 50.0)],
                vec![(100.0, 150.0), (1180.0, 150.0)],
                vec![(300.0, 150.0), (500.0, 150.0), (700.0, 150.0), (900.0, 150.0)],
                vec![],
            ),
        };

        Ok(Self {
            id,
            name: name.to_string(),
            difficulty: difficulty.to_string(),
            starting_volatile,
            path: Arc::new(Path::new(to_points(&path))?),
            initial_plots: to_points(&initial),
            purchasable_plots: to_points(&purchasable),
            barricade_spots: to_points(&spots),
        })
    }

    /// Build an ad hoc map. Every plot given here starts owned.
    pub fn custom(
        waypoints: Vec<Vec2>,
        plots: Vec<Vec2>,
        barricade_spots: Vec<Vec2>,
        starting_volatile: u32,
    ) -> Result<Self, LevelError> {
        Ok(Self {
            id: LevelId::default(),
            name: "Custom".to_string(),
            difficulty: "Custom".to_string(),
            starting_volatile,
            path: Arc::new(Path::new(waypoints)?),
            initial_plots: plots,
            purchasable_plots: Vec::new(),
            barricade_spots,
        })
    }

    /// All plots in index order: initial plots first, then purchasable ones.
    pub fn all_plots(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.initial_plots
            .iter()
            .chain(self.purchasable_plots.iter())
            .copied()
    }

    /// Index of the plot whose hit-box contains `point`.
    pub fn plot_at(&self, point: Vec2) -> Option<usize> {
        self.all_plots()
            .position(|plot| Square::new(plot, PLOT_SIZE).contains(point))
    }

    /// Whether the plot index starts out owned.
    pub fn is_initial_plot(&self, index: usize) -> bool {
        index < self.initial_plots.len()
    }

    /// Index of the barricade spot whose hit-box contains `point`.
    pub fn barricade_spot_at(&self, point: Vec2) -> Option<usize> {
        self.barricade_spots
            .iter()
            .position(|&spot| Square::new(spot, BARRICADE_SIZE).contains(point))
    }
}

fn to_points(raw: &[(f32, f32)]) -> Vec<Vec2> {
    raw.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
}
