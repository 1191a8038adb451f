//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Registered ability kinds.
///
/// Ordering is the registration order the ability manager dispatches in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Fires pooled projectiles at the nearest enemy.
    Blaster,
    /// Lays damaging segments behind the moving owner.
    Trail,
    /// Maintains a small swarm of homing bots.
    Seekers,
    /// Periodic expanding ring around the owner.
    Shockwave,
    /// Widens the owner's influence radius and pulls drops in.
    Magnet,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 5] = [
        AbilityKind::Blaster,
        AbilityKind::Trail,
        AbilityKind::Seekers,
        AbilityKind::Shockwave,
        AbilityKind::Magnet,
    ];

    /// Map a persisted ability index to a kind. Unknown ids map to `None`.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    pub fn id(self) -> u8 {
        match self {
            AbilityKind::Blaster => 0,
            AbilityKind::Trail => 1,
            AbilityKind::Seekers => 2,
            AbilityKind::Shockwave => 3,
            AbilityKind::Magnet => 4,
        }
    }

    /// Display name for notifications.
    pub fn name(self) -> &'static str {
        match self {
            AbilityKind::Blaster => "Blaster",
            AbilityKind::Trail => "Trail",
            AbilityKind::Seekers => "Seekers",
            AbilityKind::Shockwave => "Shockwave",
            AbilityKind::Magnet => "Magnet",
        }
    }
}

/// Top-level run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    Paused,
    GameOver,
}

/// Player class, chosen by the settings blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    #[default]
    Runner,
    Tank,
    Ghost,
}

impl PlayerClass {
    pub const ALL: [PlayerClass; 3] = [PlayerClass::Runner, PlayerClass::Tank, PlayerClass::Ghost];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

/// Arena variant, chosen by the settings blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorldKind {
    #[default]
    Plains,
    Crater,
    Hive,
}

impl WorldKind {
    pub const ALL: [WorldKind; 3] = [WorldKind::Plains, WorldKind::Crater, WorldKind::Hive];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

/// Visual tag a renderer uses to pick a particle material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    #[default]
    Spark,
    Pickup,
    Spawn,
    Impact,
    Dodge,
}

/// Shape of an ability-owned actor, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorShape {
    TrailSegment,
    Seeker,
    Ring,
}

/// What removed an enemy from play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    Projectile,
    Ability(AbilityKind),
    /// Consumed by touching the player.
    Contact,
}
