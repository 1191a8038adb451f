//! Kinematic integration for the player, enemies, projectiles, particles and drops,
//! plus the camera follow.

use glam::Vec3;

use arena_core::commands::MovementIntent;
use arena_core::components::{Drop, Transform};

use crate::context::SimulationContext;

/// Move the player along the sampled intent, clamped to the walkable floor.
pub fn move_player(ctx: &mut SimulationContext, intent: MovementIntent, dt: f32) {
    let walkable = ctx.walkable;
    ctx.player.walk(intent.direction(), dt, &walkable);
}

/// Seek every live enemy toward the player.
pub fn move_enemies(ctx: &mut SimulationContext, dt: f32) {
    let target = ctx.player.position;
    ctx.enemies.update(dt, target);
}

/// Integrate projectiles and particles, releasing the expired ones.
pub fn integrate_transients(ctx: &mut SimulationContext, dt: f32) {
    let arena = ctx.arena;
    ctx.projectiles.update(dt, &arena);
    ctx.particles.update(dt);
}

/// Spin drops and pull the ones inside the influence radius toward the player.
pub fn update_drops(ctx: &mut SimulationContext, dt: f32) {
    let player = ctx.player.position;
    let radius_sq = ctx.player.influence_radius * ctx.player.influence_radius;
    let speed = ctx.tuning.drop_attract_speed;

    for (_entity, (transform, drop)) in ctx.world.query_mut::<(&mut Transform, &Drop)>() {
        transform.rotation = (transform.rotation + drop.spin_rate * dt)
            .rem_euclid(std::f32::consts::TAU);
        if transform.position.distance_squared(player) <= radius_sq {
            transform.position = step_toward(transform.position, player, speed * dt);
        }
    }
}

/// Ease the camera target toward the player, frame-rate independent.
pub fn follow_camera(ctx: &mut SimulationContext, dt: f32) {
    let blend = 1.0 - (-ctx.tuning.camera_follow_rate * dt).exp();
    ctx.camera_target = ctx.camera_target.lerp(ctx.player.position, blend);
}

/// Move `from` toward `to` by at most `max_step`.
pub fn step_toward(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let offset = to - from;
    let distance = offset.length();
    if distance <= max_step || distance == 0.0 {
        to
    } else {
        from + offset / distance * max_step
    }
}
