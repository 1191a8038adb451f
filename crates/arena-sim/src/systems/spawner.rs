//! Enemy spawner: paced batches on a ring around the player.
//!
//! The interval and batch size come from the world's spawn schedule and ramp
//! with elapsed time. A full pool recycles its oldest enemy.

use arena_core::constants::*;
use arena_core::enums::ParticleKind;

use crate::context::SimulationContext;
use crate::pool::ParticleMotion;
use crate::world_setup;

/// Countdown to the next batch.
#[derive(Debug, Clone, Default)]
pub struct SpawnerState {
    pub timer: f32,
}

/// Count down and spawn a batch when due. Returns how many enemies were admitted.
pub fn run(ctx: &mut SimulationContext, state: &mut SpawnerState, dt: f32) -> usize {
    if !ctx.tuning.spawner_enabled {
        return 0;
    }

    state.timer -= dt;
    if state.timer > 0.0 {
        return 0;
    }

    let phase = ctx
        .world_profile
        .spawn_phase_at(ctx.time.elapsed_secs as f32);
    state.timer += phase.interval_secs.max(dt);

    let mut admitted = 0;
    for _ in 0..phase.batch {
        let position = world_setup::ring_point(
            &mut ctx.rng,
            ctx.player.position,
            ctx.tuning.enemy_spawn_radius,
            &ctx.walkable,
        );
        if ctx.enemies.add_or_evict(position).is_none() {
            break;
        }
        admitted += 1;
        ctx.particles.burst(
            &mut ctx.rng,
            position,
            SPAWN_BURST_PARTICLES,
            PARTICLE_SPEED * 0.5,
            PARTICLE_LIFETIME,
            ParticleKind::Spawn,
            ParticleMotion::Damped(PARTICLE_DAMPING),
        );
    }
    admitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimConfig;

    #[test]
    fn first_batch_spawns_immediately_then_waits() {
        let mut ctx = world_setup::build_context(&SimConfig::default());
        let mut state = SpawnerState::default();
        let first = ctx.world_profile.spawn_phase_at(0.0);

        assert_eq!(run(&mut ctx, &mut state, DT), first.batch);
        assert_eq!(run(&mut ctx, &mut state, DT), 0);
        assert_eq!(ctx.enemies.len(), first.batch);
        for (_, enemy) in ctx.enemies.iter() {
            assert!(ctx.walkable.contains(enemy.position));
        }
    }

    #[test]
    fn disabled_spawner_is_idle() {
        let mut ctx = world_setup::build_context(&SimConfig::default());
        ctx.tuning.spawner_enabled = false;
        let mut state = SpawnerState::default();
        for _ in 0..600 {
            run(&mut ctx, &mut state, DT);
        }
        assert!(ctx.enemies.is_empty());
    }

    #[test]
    fn full_pool_keeps_population_at_capacity() {
        let mut config = SimConfig::default();
        config.tuning.enemy_capacity = 5;
        let mut ctx = world_setup::build_context(&config);
        let mut state = SpawnerState::default();
        for _ in 0..10 {
            state.timer = 0.0;
            run(&mut ctx, &mut state, DT);
        }
        assert_eq!(ctx.enemies.len(), 5);
    }

    #[test]
    fn cornered_player_never_gets_spawned_on() {
        let mut ctx = world_setup::build_context(&SimConfig::default());
        ctx.player.position = ctx.walkable.max;
        let mut state = SpawnerState::default();
        for _ in 0..40 {
            state.timer = 0.0;
            run(&mut ctx, &mut state, DT);
        }
        assert!(!ctx.enemies.is_empty());
        let radius = ctx.tuning.enemy_spawn_radius;
        for (_, enemy) in ctx.enemies.iter() {
            let distance = enemy.position.distance(ctx.player.position);
            assert!(distance > radius * 0.99, "spawned {distance} m from the player");
        }
    }
}
