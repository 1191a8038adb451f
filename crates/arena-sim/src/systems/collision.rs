//! Collision resolver.
//!
//! Runs once per step, strictly after movement and ability updates. Rebuilds
//! the spatial index from live enemies, then resolves player vs enemy,
//! projectile vs enemy and player vs drop. All comparisons use squared
//! distances against named tuning thresholds.

use rand::Rng;
use tracing::debug;

use arena_core::components::{Drop, Transform};
use arena_core::config::ContactPolicy;
use arena_core::constants::*;
use arena_core::enums::{AbilityKind, GamePhase, KillCause, ParticleKind};
use arena_core::events::GameEvent;
use arena_core::types::{Aabb, SlotHandle};

use crate::context::SimulationContext;
use crate::player::DamageOutcome;
use crate::pool::ParticleMotion;
use crate::systems::combat;

/// Resolve all collisions for this step. Returns the grants of collected drops,
/// in collection order, for the ability manager to apply.
pub fn run(ctx: &mut SimulationContext) -> Vec<AbilityKind> {
    ctx.rebuild_index();

    let mut nearby = Vec::new();
    player_vs_enemies(ctx, &mut nearby);
    // Game over is terminal: nothing is collected or rewarded afterwards.
    if ctx.phase == GamePhase::GameOver {
        return Vec::new();
    }
    projectiles_vs_enemies(ctx, &mut nearby);
    player_vs_drops(ctx)
}

fn player_vs_enemies(ctx: &mut SimulationContext, nearby: &mut Vec<SlotHandle>) {
    if ctx.phase == GamePhase::GameOver {
        return;
    }

    let center = ctx.player.position;
    let threshold = ctx.tuning.player_contact_radius;
    ctx.index
        .query_into(&Aabb::around(center, threshold), nearby);
    let threshold_sq = threshold * threshold;

    for &handle in nearby.iter() {
        let Some(enemy) = ctx.enemies.get(handle) else {
            continue;
        };
        if enemy.position.distance_squared(center) > threshold_sq {
            continue;
        }

        match ctx.tuning.contact_policy {
            ContactPolicy::Lethal => {
                let health = ctx.player.health;
                hit_player(ctx, health, false);
            }
            ContactPolicy::Damage { amount } => {
                combat::consume_enemy(ctx, handle);
                let evasion = ctx.player.evasion;
                let dodged = evasion > 0.0 && ctx.rng.gen_bool(evasion);
                hit_player(ctx, amount, dodged);
            }
        }

        if ctx.phase == GamePhase::GameOver {
            return;
        }
    }
}

fn hit_player(ctx: &mut SimulationContext, damage: f32, dodged: bool) {
    if dodged {
        let position = ctx.player.position;
        ctx.particles.burst(
            &mut ctx.rng,
            position,
            PICKUP_BURST_PARTICLES / 2,
            PARTICLE_SPEED,
            PARTICLE_LIFETIME,
            ParticleKind::Dodge,
            ParticleMotion::Damped(PARTICLE_DAMPING),
        );
    }

    let outcome = if dodged {
        None
    } else {
        Some(ctx.player.apply_damage(damage))
    };
    ctx.push_event(GameEvent::PlayerHit {
        damage: if dodged { 0.0 } else { damage },
        remaining_health: ctx.player.health,
        dodged,
        tick: ctx.time.tick,
    });
    if outcome == Some(DamageOutcome::Killed) {
        ctx.end_run();
    }
}

fn projectiles_vs_enemies(ctx: &mut SimulationContext, nearby: &mut Vec<SlotHandle>) {
    let threshold = ctx.tuning.projectile_hit_radius;
    let threshold_sq = threshold * threshold;
    let in_flight: Vec<(SlotHandle, glam::Vec3)> = ctx
        .projectiles
        .iter()
        .map(|(handle, p)| (handle, p.position))
        .collect();

    for (projectile, position) in in_flight {
        ctx.index
            .query_into(&Aabb::around(position, threshold), nearby);
        // Enemies killed earlier in this pass are stale and no longer resolve.
        let target = nearby.iter().copied().find(|&handle| {
            ctx.enemies
                .get(handle)
                .is_some_and(|e| e.position.distance_squared(position) <= threshold_sq)
        });
        let Some(target) = target else {
            continue;
        };

        ctx.projectiles.release(projectile);
        ctx.push_event(GameEvent::ProjectileHit {
            position,
            tick: ctx.time.tick,
        });
        ctx.particles.burst(
            &mut ctx.rng,
            position,
            KILL_BURST_PARTICLES / 2,
            PARTICLE_SPEED,
            PARTICLE_LIFETIME * 0.5,
            ParticleKind::Impact,
            ParticleMotion::Linear,
        );
        combat::kill_enemy(ctx, target, KillCause::Projectile);
    }
}

fn player_vs_drops(ctx: &mut SimulationContext) -> Vec<AbilityKind> {
    let center = ctx.player.position;
    let threshold_sq = ctx.tuning.drop_pickup_radius * ctx.tuning.drop_pickup_radius;

    let mut collected = Vec::new();
    for (entity, (transform, drop)) in ctx.world.query::<(&Transform, &Drop)>().iter() {
        if transform.position.distance_squared(center) <= threshold_sq {
            collected.push((entity, drop.grant));
        }
    }

    let mut grants = Vec::with_capacity(collected.len());
    for (entity, grant) in collected {
        if ctx.world.despawn(entity).is_err() {
            continue;
        }
        debug!(grant = ?grant, "drop collected");
        ctx.stats.drops_collected += 1;
        ctx.particles.burst(
            &mut ctx.rng,
            center,
            PICKUP_BURST_PARTICLES,
            PARTICLE_SPEED,
            PARTICLE_LIFETIME,
            ParticleKind::Pickup,
            ParticleMotion::Damped(PARTICLE_DAMPING),
        );
        grants.push(grant);
    }
    grants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimConfig;
    use crate::world_setup;
    use glam::Vec3;

    fn context(policy: ContactPolicy) -> SimulationContext {
        let mut config = SimConfig::default();
        config.tuning.contact_policy = policy;
        config.tuning.drop_chance = 0.0;
        world_setup::build_context(&config)
    }

    fn count_events(ctx: &SimulationContext, pred: impl Fn(&GameEvent) -> bool) -> usize {
        ctx.events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn lethal_contact_ends_run_once() {
        let mut ctx = context(ContactPolicy::Lethal);
        ctx.enemies.add_entity(Vec3::new(0.2, 0.0, 0.0)).unwrap();
        ctx.enemies.add_entity(Vec3::new(-0.2, 0.0, 0.0)).unwrap();
        run(&mut ctx);
        run(&mut ctx);

        assert_eq!(ctx.phase, GamePhase::GameOver);
        assert_eq!(ctx.player.health, 0.0);
        assert_eq!(
            count_events(&ctx, |e| matches!(e, GameEvent::GameOver { .. })),
            1
        );
    }

    #[test]
    fn enemy_outside_threshold_is_harmless() {
        let mut ctx = context(ContactPolicy::Lethal);
        let r = ctx.tuning.player_contact_radius;
        // Inside the query box corner but outside the exact radius.
        ctx.enemies.add_entity(Vec3::new(r * 0.9, 0.0, r * 0.9)).unwrap();
        run(&mut ctx);
        assert_eq!(ctx.phase, GamePhase::Running);
    }

    #[test]
    fn damage_contact_consumes_enemy() {
        let mut ctx = context(ContactPolicy::Damage { amount: 1.0 });
        let h = ctx.enemies.add_entity(Vec3::ZERO).unwrap();
        let before = ctx.player.health;
        run(&mut ctx);
        assert!(!ctx.enemies.contains(h));
        assert_eq!(ctx.player.health, before - 1.0);
        assert_eq!(ctx.phase, GamePhase::Running);
    }

    #[test]
    fn projectile_hits_at_most_one_enemy() {
        let mut ctx = context(ContactPolicy::Lethal);
        let a = ctx.enemies.add_entity(Vec3::new(10.0, 0.0, 0.0)).unwrap();
        let b = ctx.enemies.add_entity(Vec3::new(10.1, 0.0, 0.0)).unwrap();
        let p = ctx
            .projectiles
            .fire(Vec3::new(10.05, 0.0, 0.0), Vec3::X, 1.0)
            .unwrap();
        run(&mut ctx);

        assert!(!ctx.projectiles.contains(p));
        assert_eq!(ctx.enemies.len(), 1);
        assert!(ctx.enemies.contains(a) != ctx.enemies.contains(b));
        assert_eq!(
            count_events(&ctx, |e| matches!(e, GameEvent::ProjectileHit { .. })),
            1
        );
    }

    #[test]
    fn drop_pickup_despawns_and_reports_grant() {
        let mut ctx = context(ContactPolicy::Lethal);
        world_setup::spawn_drop(
            &mut ctx.world,
            &mut ctx.rng,
            Vec3::new(0.5, 0.0, 0.0),
            AbilityKind::Seekers,
        );
        world_setup::spawn_drop(
            &mut ctx.world,
            &mut ctx.rng,
            Vec3::new(30.0, 0.0, 0.0),
            AbilityKind::Trail,
        );
        assert_eq!(run(&mut ctx), vec![AbilityKind::Seekers]);
        assert_eq!(ctx.live_drop_count(), 1);
        assert_eq!(ctx.stats.drops_collected, 1);
    }

    #[test]
    fn nothing_is_collected_on_the_fatal_step() {
        let mut ctx = context(ContactPolicy::Lethal);
        ctx.enemies.add_entity(Vec3::new(0.1, 0.0, 0.0)).unwrap();
        world_setup::spawn_drop(&mut ctx.world, &mut ctx.rng, Vec3::ZERO, AbilityKind::Trail);

        assert!(run(&mut ctx).is_empty());
        assert_eq!(ctx.phase, GamePhase::GameOver);
        assert_eq!(ctx.live_drop_count(), 1);
        assert_eq!(ctx.stats.drops_collected, 0);
    }
}
