//! Fundamental geometric and simulation types.
//!
//! Positions are `glam::Vec2` in screen-space pixels (x = right, y = down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each simulation step).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Axis-aligned square used for plot, spot, and barricade hit-tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub center: Vec2,
    pub half_extent: f32,
}

impl Square {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self {
            center,
            half_extent: size * 0.5,
        }
    }

    /// Point-in-square test. The left/top edges are inclusive and the
    /// right/bottom edges exclusive, like a pixel rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.center - Vec2::splat(self.half_extent);
        let max = self.center + Vec2::splat(self.half_extent);
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }
}

/// Strict radius test. A non-positive radius never matches.
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    radius > 0.0 && a.distance_squared(b) < radius * radius
}
