//! Core types and definitions for the Aetheria simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, timers, commands, state snapshots, events, stat tables,
//! level topology, and constants. It has no dependency on any runtime
//! framework or ECS.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod levels;
pub mod state;
pub mod stats;
pub mod timers;
pub mod types;

pub use glam::Vec2;
