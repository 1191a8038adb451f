//! hecs components for drops and ability-owned actors.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and abilities, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{AbilityKind, ActorShape};

/// World placement of a hecs entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about +Y (radians).
    pub rotation: f32,
}

/// A pickup that grants an ability on contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    /// Spin about +Y (rad/s).
    pub spin_rate: f32,
    pub grant: AbilityKind,
}

/// A renderable sub-entity owned by an ability instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityActor {
    pub kind: AbilityKind,
    pub shape: ActorShape,
    /// Current visual radius (m).
    pub radius: f32,
}
