//! Simulation runtime for the arena.
//!
//! Owns the pools, the spatial index and the ability runtime, runs systems at
//! a fixed tick rate, and produces GameStateSnapshots for render and UI
//! collaborators.

pub mod abilities;
pub mod context;
pub mod engine;
pub mod fixed_step;
pub mod player;
pub mod pool;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use fixed_step::{FixedStepLoop, LoopState};
