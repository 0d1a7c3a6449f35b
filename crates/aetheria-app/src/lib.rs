//! Aetheria headless application.
//!
//! This crate wires the simulation to its outside collaborators: a
//! fixed-rate game loop thread, the persistent currency store, and an
//! autopilot that plays in place of a human.

pub mod autopilot;
pub mod game_loop;
pub mod persistence;
pub mod session;
pub mod state;

pub use aetheria_core as core;
