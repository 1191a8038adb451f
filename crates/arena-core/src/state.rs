//! Game state snapshot: the complete visible state handed to render and UI collaborators.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Everything a renderer or HUD needs for one frame. Read-only by contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    /// Live enemies by slot. Slots not listed are hidden instances.
    pub enemies: Vec<EnemyView>,
    pub enemy_capacity: usize,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<ParticleView>,
    pub drops: Vec<DropView>,
    pub actors: Vec<ActorView>,
    pub camera_target: Vec3,
    pub hud: HudView,
    /// Events raised since the previous snapshot.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub rotation: f32,
    /// False while the player's visual asset is still loading.
    pub visible: bool,
    pub influence_radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub slot: u32,
    pub position: Vec3,
    /// Remaining hit points as a fraction of spawn health.
    pub health_fraction: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub slot: u32,
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Vec3,
    pub kind: ParticleKind,
    /// Remaining life as a fraction of initial life, for fading.
    pub life_fraction: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropView {
    pub position: Vec3,
    pub rotation: f32,
    pub grant: AbilityKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    pub kind: AbilityKind,
    pub shape: ActorShape,
    pub position: Vec3,
    pub rotation: f32,
    pub radius: f32,
}

/// Aggregate counters for HUD display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub health: f32,
    pub max_health: f32,
    pub experience: u32,
    pub experience_threshold: u32,
    pub level: u32,
    pub elapsed_secs: f64,
    pub kills: u32,
    pub abilities: Vec<AbilityKind>,
}
