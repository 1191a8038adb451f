//! Events emitted by the simulation for UI and audio feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{AbilityKind, KillCause};

/// Discrete notifications, drained by the host after each step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An ability became active on the player.
    AbilityAcquired { kind: AbilityKind, tick: u64 },
    /// An ability was deactivated.
    AbilityLost { kind: AbilityKind, tick: u64 },
    /// The player gained a level.
    LevelUp {
        level: u32,
        next_threshold: u32,
        tick: u64,
    },
    /// The player took damage or dodged it.
    PlayerHit {
        damage: f32,
        remaining_health: f32,
        dodged: bool,
        tick: u64,
    },
    /// A projectile struck an enemy.
    ProjectileHit { position: Vec3, tick: u64 },
    /// An enemy left play.
    EnemyKilled {
        position: Vec3,
        cause: KillCause,
        tick: u64,
    },
    /// The player picked up a drop.
    DropCollected {
        grant: AbilityKind,
        granted: bool,
        tick: u64,
    },
    /// Player health reached zero. Emitted exactly once per run.
    GameOver {
        tick: u64,
        elapsed_secs: f64,
        kills: u32,
        level: u32,
    },
}
