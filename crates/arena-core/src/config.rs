//! Tuning values and the session settings blob.
//!
//! `Tuning` is deserialized with `#[serde(default)]`, so a host can override
//! a handful of fields from JSON and keep the rest at their defaults.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{AbilityKind, PlayerClass, WorldKind};

/// What happens when an enemy touches the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContactPolicy {
    /// Any contact ends the run.
    #[default]
    Lethal,
    /// Contact deals `amount` damage and consumes the enemy.
    Damage { amount: f32 },
}

/// Every capacity and threshold the simulation reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Pools and index
    pub enemy_capacity: usize,
    pub projectile_capacity: usize,
    pub particle_capacity: usize,
    pub max_live_drops: usize,
    pub octree_node_capacity: usize,
    pub octree_max_depth: u32,

    // Collision
    pub player_contact_radius: f32,
    pub projectile_hit_radius: f32,
    pub drop_pickup_radius: f32,
    pub contact_policy: ContactPolicy,

    // Enemies and drops
    pub enemy_health: f32,
    pub enemy_spawn_radius: f32,
    pub drop_chance: f64,
    /// Off for runs that place enemies by hand.
    pub spawner_enabled: bool,

    // Player
    pub base_experience_threshold: u32,
    pub experience_threshold_growth: f32,
    pub experience_per_kill: u32,
    pub drop_attract_speed: f32,
    pub camera_follow_rate: f32,

    // Abilities
    pub blaster_cooldown: f32,
    pub blaster_range: f32,
    pub blaster_projectile_speed: f32,
    pub blaster_projectile_lifetime: f32,

    pub trail_segment_interval: f32,
    pub trail_segment_lifetime: f32,
    pub trail_segment_radius: f32,
    pub trail_damage: f32,
    pub trail_max_segments: usize,

    pub seeker_count: usize,
    pub seeker_speed: f32,
    pub seeker_lifetime: f32,
    pub seeker_hit_radius: f32,
    pub seeker_damage: f32,
    pub seeker_hit_budget: u32,
    pub seeker_acquire_range: f32,
    pub seeker_respawn: f32,

    pub shockwave_cooldown: f32,
    pub shockwave_expansion_speed: f32,
    pub shockwave_max_radius: f32,
    pub shockwave_damage: f32,
    pub shockwave_knockback: f32,

    pub magnet_radius_bonus: f32,
    pub magnet_pull_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_capacity: ENEMY_POOL_CAPACITY,
            projectile_capacity: PROJECTILE_POOL_CAPACITY,
            particle_capacity: PARTICLE_POOL_CAPACITY,
            max_live_drops: MAX_LIVE_DROPS,
            octree_node_capacity: OCTREE_NODE_CAPACITY,
            octree_max_depth: OCTREE_MAX_DEPTH,

            player_contact_radius: PLAYER_CONTACT_RADIUS,
            projectile_hit_radius: PROJECTILE_HIT_RADIUS,
            drop_pickup_radius: DROP_PICKUP_RADIUS,
            contact_policy: ContactPolicy::default(),

            enemy_health: ENEMY_HEALTH,
            enemy_spawn_radius: ENEMY_SPAWN_RADIUS,
            drop_chance: DROP_CHANCE,
            spawner_enabled: true,

            base_experience_threshold: BASE_EXPERIENCE_THRESHOLD,
            experience_threshold_growth: EXPERIENCE_THRESHOLD_GROWTH,
            experience_per_kill: EXPERIENCE_PER_KILL,
            drop_attract_speed: DROP_ATTRACT_SPEED,
            camera_follow_rate: CAMERA_FOLLOW_RATE,

            blaster_cooldown: BLASTER_COOLDOWN_SECS,
            blaster_range: BLASTER_RANGE,
            blaster_projectile_speed: BLASTER_PROJECTILE_SPEED,
            blaster_projectile_lifetime: BLASTER_PROJECTILE_LIFETIME,

            trail_segment_interval: TRAIL_SEGMENT_INTERVAL_SECS,
            trail_segment_lifetime: TRAIL_SEGMENT_LIFETIME_SECS,
            trail_segment_radius: TRAIL_SEGMENT_RADIUS,
            trail_damage: TRAIL_DAMAGE,
            trail_max_segments: TRAIL_MAX_SEGMENTS,

            seeker_count: SEEKER_COUNT,
            seeker_speed: SEEKER_SPEED,
            seeker_lifetime: SEEKER_LIFETIME_SECS,
            seeker_hit_radius: SEEKER_HIT_RADIUS,
            seeker_damage: SEEKER_DAMAGE,
            seeker_hit_budget: SEEKER_HIT_BUDGET,
            seeker_acquire_range: SEEKER_ACQUIRE_RANGE,
            seeker_respawn: SEEKER_RESPAWN_SECS,

            shockwave_cooldown: SHOCKWAVE_COOLDOWN_SECS,
            shockwave_expansion_speed: SHOCKWAVE_EXPANSION_SPEED,
            shockwave_max_radius: SHOCKWAVE_MAX_RADIUS,
            shockwave_damage: SHOCKWAVE_DAMAGE,
            shockwave_knockback: SHOCKWAVE_KNOCKBACK,

            magnet_radius_bonus: MAGNET_RADIUS_BONUS,
            magnet_pull_speed: MAGNET_PULL_SPEED,
        }
    }
}

/// The small settings blob a host persists between sessions.
///
/// Indices come from local storage or a daily on-chain record; the core only
/// reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub class_index: u8,
    pub ability_index: u8,
    pub world_index: u8,
    pub seed: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            class_index: 0,
            ability_index: AbilityKind::Blaster.id(),
            world_index: 0,
            seed: 42,
        }
    }
}

impl SessionSettings {
    /// Resolved class; out-of-range indices fall back to the default class.
    pub fn class(&self) -> PlayerClass {
        PlayerClass::from_index(self.class_index).unwrap_or_default()
    }

    /// Resolved world; out-of-range indices fall back to the default world.
    pub fn world(&self) -> WorldKind {
        WorldKind::from_index(self.world_index).unwrap_or_default()
    }
}
