//! Systems that operate on the simulation context each step.
//!
//! Systems are pure functions that take `&mut SimulationContext` (or `&` for
//! read-only). They do not own state. All state lives in the context.

pub mod collision;
pub mod combat;
pub mod movement;
pub mod snapshot;
pub mod spawner;
