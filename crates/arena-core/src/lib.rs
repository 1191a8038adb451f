//! Core types and definitions for the arena simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, commands, tuning, profiles, snapshots, events and constants.
//! It has no dependency on the simulation runtime or any host.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod profiles;
pub mod state;
pub mod types;
