//! Headless host for the arena simulation.
//!
//! Loads settings and tuning from JSON, drives the engine at a fixed tick
//! rate and hands each frame's snapshot to a presenter.

pub mod game_loop;
pub mod presenter;
pub mod settings;

pub use arena_core as core;
