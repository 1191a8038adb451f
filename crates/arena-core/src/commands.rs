//! Commands and input sent from collaborators to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Movement
//! intent is sampled once per fixed step.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::AbilityKind;

/// Discrete requests from the UI or host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Suspend step execution.
    Pause,
    /// Resume step execution.
    Resume,
    /// Grant an ability directly (debug menus, scripted rewards).
    GrantAbility { kind: AbilityKind },
    /// Deactivate an ability.
    RevokeAbility { kind: AbilityKind },
    /// The player's visual asset finished loading.
    PlayerVisualReady,
}

/// Flat movement intents for one step. Device-agnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    pub const IDLE: MovementIntent = MovementIntent {
        forward: false,
        back: false,
        left: false,
        right: false,
    };

    /// Normalized planar direction, or zero when idle or when opposing intents cancel.
    ///
    /// Forward is +Z, right is +X.
    pub fn direction(&self) -> Vec3 {
        let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec3::new(axis(self.right, self.left), 0.0, axis(self.forward, self.back))
            .normalize_or_zero()
    }

    pub fn is_idle(&self) -> bool {
        self.direction() == Vec3::ZERO
    }
}
