//! Simulation engine for Aetheria.
//!
//! Owns the hecs ECS world, runs the tick phases in a fixed order,
//! and produces GameStateSnapshots for the render collaborator.

pub mod engine;
pub mod placement;
pub mod relations;
pub mod systems;
pub mod world_setup;

pub use aetheria_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
