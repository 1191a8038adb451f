//! Construction of the simulation context and spawn factories.
//!
//! Builds the arena, pools and player from the session settings, and creates
//! drop entities with their component bundles.

use glam::Vec3;
use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use arena_core::components::{Drop, Transform};
use arena_core::constants::*;
use arena_core::enums::{AbilityKind, GamePhase};
use arena_core::profiles::{class_profile, world_profile, WorldProfile};
use arena_core::types::{Aabb, SimTime};

use crate::context::{RunStats, SimulationContext};
use crate::engine::SimConfig;
use crate::player::Player;
use crate::pool::{EnemyPool, ParticlePool, ProjectilePool};
use crate::spatial::{Octree, OctreeConfig};

/// Full arena volume for a world.
pub fn arena_bounds(profile: &WorldProfile) -> Aabb {
    Aabb::new(
        Vec3::new(-profile.half_extent, -ARENA_HALF_HEIGHT, -profile.half_extent),
        Vec3::new(profile.half_extent, ARENA_HALF_HEIGHT, profile.half_extent),
    )
}

/// Floor area walkers are clamped into.
pub fn walkable_bounds(profile: &WorldProfile) -> Aabb {
    let half = (profile.half_extent - ARENA_EDGE_MARGIN).max(0.0);
    Aabb::new(Vec3::new(-half, 0.0, -half), Vec3::new(half, 0.0, half))
}

/// Build a fresh context for a run: player at the origin, empty pools.
pub fn build_context(config: &SimConfig) -> SimulationContext {
    let tuning = config.tuning.clone();
    let profile = world_profile(config.settings.world());
    let class = class_profile(config.settings.class());
    let arena = arena_bounds(&profile);

    let index_config = OctreeConfig {
        node_capacity: tuning.octree_node_capacity.max(1),
        max_depth: tuning.octree_max_depth,
    };

    SimulationContext {
        player: Player::new(&class, &tuning),
        enemies: EnemyPool::new(tuning.enemy_capacity, profile.enemy_speed, tuning.enemy_health),
        projectiles: ProjectilePool::new(tuning.projectile_capacity),
        particles: ParticlePool::new(tuning.particle_capacity),
        index: Octree::new(arena, index_config),
        world: World::new(),
        rng: ChaCha8Rng::seed_from_u64(config.seed),
        time: SimTime::default(),
        phase: GamePhase::Running,
        camera_target: Vec3::ZERO,
        stats: RunStats::default(),
        events: Vec::new(),
        walkable: walkable_bounds(&profile),
        arena,
        world_profile: profile,
        tuning,
    }
}

/// Spawn a spinning drop granting `grant` at `position`.
pub fn spawn_drop(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Vec3,
    grant: AbilityKind,
) -> hecs::Entity {
    world.spawn((
        Transform {
            position,
            rotation: 0.0,
        },
        Drop {
            spin_rate: rng.gen_range(DROP_SPIN_MIN..=DROP_SPIN_MAX),
            grant,
        },
    ))
}

/// Pick a random grant for a new drop.
pub fn roll_grant(rng: &mut ChaCha8Rng) -> AbilityKind {
    AbilityKind::ALL[rng.gen_range(0..AbilityKind::ALL.len())]
}

/// Point on a ring of `radius` around `center`, on the floor and inside `bounds`.
///
/// An axis that leaves `bounds` is mirrored through `center`, which keeps the
/// point on the ring. Clamping only applies when the bounds are narrower than
/// the ring's diameter.
pub fn ring_point(rng: &mut ChaCha8Rng, center: Vec3, radius: f32, bounds: &Aabb) -> Vec3 {
    let heading = rng.gen_range(0.0..std::f32::consts::TAU);
    let offset = arena_core::types::planar_direction(heading) * radius;
    let x = mirror_into(center.x, offset.x, bounds.min.x, bounds.max.x);
    let z = mirror_into(center.z, offset.z, bounds.min.z, bounds.max.z);
    bounds.clamp(Vec3::new(x, 0.0, z))
}

fn mirror_into(center: f32, offset: f32, min: f32, max: f32) -> f32 {
    let forward = center + offset;
    if (min..=max).contains(&forward) {
        forward
    } else {
        center - offset
    }
}
