//! Damage, kills and their side effects.
//!
//! Shared by the collision resolver and by abilities. Every kill goes through
//! [`kill_enemy`], which releases the slot, counts the kill, awards experience,
//! emits particles and rolls for a drop.

use glam::Vec3;
use rand::Rng;
use tracing::{debug, info};

use arena_core::constants::*;
use arena_core::enums::{KillCause, ParticleKind};
use arena_core::events::GameEvent;
use arena_core::types::{Aabb, SlotHandle};

use crate::context::SimulationContext;
use crate::pool::ParticleMotion;
use crate::world_setup;

/// Query margin for one step of seeking. The index holds positions from the
/// previous collision pass, and enemies have moved since.
const SEEK_SLACK: f32 = 1.0;

/// Largest distance an enemy can be from its indexed position within a step:
/// one knockback plus seeking. An enemy knocked back twice in the same step
/// can fall outside it until the next rebuild.
fn index_slack(ctx: &SimulationContext) -> f32 {
    ctx.tuning.shockwave_knockback.max(0.0) + SEEK_SLACK
}

/// Live enemies whose current position is within `radius` of `center`, in index order.
pub fn enemies_within(
    ctx: &SimulationContext,
    center: Vec3,
    radius: f32,
    out: &mut Vec<SlotHandle>,
) {
    let range = Aabb::around(center, radius + index_slack(ctx));
    ctx.index.query_into(&range, out);
    let radius_sq = radius * radius;
    out.retain(|&handle| {
        ctx.enemies
            .get(handle)
            .is_some_and(|enemy| enemy.position.distance_squared(center) <= radius_sq)
    });
}

/// Closest live enemy within `range` of `origin` that `skip` does not reject.
pub fn nearest_enemy(
    ctx: &SimulationContext,
    origin: Vec3,
    range: f32,
    skip: impl Fn(SlotHandle) -> bool,
) -> Option<(SlotHandle, Vec3)> {
    let mut candidates = Vec::new();
    enemies_within(ctx, origin, range, &mut candidates);

    let mut best: Option<(SlotHandle, Vec3, f32)> = None;
    for handle in candidates {
        if skip(handle) {
            continue;
        }
        let Some(enemy) = ctx.enemies.get(handle) else {
            continue;
        };
        let dist_sq = enemy.position.distance_squared(origin);
        if best.map_or(true, |(_, _, d)| dist_sq < d) {
            best = Some((handle, enemy.position, dist_sq));
        }
    }
    best.map(|(handle, position, _)| (handle, position))
}

/// Apply `amount` damage. Returns true if the enemy died.
pub fn damage_enemy(
    ctx: &mut SimulationContext,
    handle: SlotHandle,
    amount: f32,
    cause: KillCause,
) -> bool {
    let Some(enemy) = ctx.enemies.get_mut(handle) else {
        return false;
    };
    enemy.health -= amount;
    if enemy.health > 0.0 {
        return false;
    }
    kill_enemy(ctx, handle, cause)
}

/// Destroy an enemy with full rewards. Returns false for stale handles.
pub fn kill_enemy(ctx: &mut SimulationContext, handle: SlotHandle, cause: KillCause) -> bool {
    let Some(position) = ctx.enemies.get(handle).map(|e| e.position) else {
        return false;
    };
    ctx.enemies.remove_entity(handle);
    ctx.stats.kills += 1;
    ctx.push_event(GameEvent::EnemyKilled {
        position,
        cause,
        tick: ctx.time.tick,
    });

    ctx.particles.burst(
        &mut ctx.rng,
        position,
        KILL_BURST_PARTICLES,
        PARTICLE_SPEED,
        PARTICLE_LIFETIME,
        ParticleKind::Spark,
        ParticleMotion::Gravity(PARTICLE_GRAVITY),
    );

    award_experience(ctx);
    roll_drop(ctx, position);
    true
}

/// Remove an enemy that touched the player. No rewards.
pub fn consume_enemy(ctx: &mut SimulationContext, handle: SlotHandle) -> bool {
    let Some(position) = ctx.enemies.get(handle).map(|e| e.position) else {
        return false;
    };
    ctx.enemies.remove_entity(handle);
    ctx.stats.contacts += 1;
    ctx.push_event(GameEvent::EnemyKilled {
        position,
        cause: KillCause::Contact,
        tick: ctx.time.tick,
    });
    true
}

fn award_experience(ctx: &mut SimulationContext) {
    let reached = ctx.player.gain_experience(
        ctx.tuning.experience_per_kill,
        ctx.tuning.experience_threshold_growth,
    );
    for level in reached {
        info!(level, tick = ctx.time.tick, "level up");
        ctx.push_event(GameEvent::LevelUp {
            level,
            next_threshold: ctx.player.experience_threshold,
            tick: ctx.time.tick,
        });
    }
}

/// Roll the configured drop chance. Rolls past the live-drop cap are discarded.
fn roll_drop(ctx: &mut SimulationContext, position: Vec3) {
    let chance = ctx.tuning.drop_chance.clamp(0.0, 1.0);
    if !ctx.rng.gen_bool(chance) {
        return;
    }
    if ctx.live_drop_count() >= ctx.tuning.max_live_drops {
        debug!(cap = ctx.tuning.max_live_drops, "drop discarded at live cap");
        return;
    }
    let grant = world_setup::roll_grant(&mut ctx.rng);
    world_setup::spawn_drop(&mut ctx.world, &mut ctx.rng, position, grant);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimConfig;

    fn context() -> SimulationContext {
        world_setup::build_context(&SimConfig::default())
    }

    #[test]
    fn nearest_enemy_uses_current_positions() {
        let mut ctx = context();
        let a = ctx.enemies.add_entity(Vec3::new(5.0, 0.0, 0.0)).unwrap();
        let b = ctx.enemies.add_entity(Vec3::new(8.0, 0.0, 0.0)).unwrap();
        ctx.rebuild_index();
        // a moves away after the index was built
        ctx.enemies.get_mut(a).unwrap().position.x = 9.5;

        let (hit, _) = nearest_enemy(&ctx, Vec3::ZERO, 20.0, |_| false).unwrap();
        assert_eq!(hit, b);
        let (hit, _) = nearest_enemy(&ctx, Vec3::ZERO, 20.0, |h| h == b).unwrap();
        assert_eq!(hit, a);
    }

    #[test]
    fn knocked_back_enemy_is_still_found_before_rebuild() {
        let mut ctx = context();
        let origin = Vec3::new(4.0, 0.0, 0.0);
        let h = ctx.enemies.add_entity(origin).unwrap();
        ctx.rebuild_index();
        let shoved = origin + Vec3::X * ctx.tuning.shockwave_knockback;
        ctx.enemies.get_mut(h).unwrap().position = shoved;

        let mut found = Vec::new();
        enemies_within(&ctx, shoved, 0.5, &mut found);
        assert_eq!(found, vec![h]);
    }

    #[test]
    fn stale_index_entries_are_skipped() {
        let mut ctx = context();
        let a = ctx.enemies.add_entity(Vec3::ONE).unwrap();
        ctx.rebuild_index();
        ctx.enemies.remove_entity(a);
        let mut out = Vec::new();
        enemies_within(&ctx, Vec3::ONE, 2.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn damage_kills_at_zero_health() {
        let mut ctx = context();
        ctx.tuning.drop_chance = 0.0;
        let h = ctx.enemies.add_entity(Vec3::ZERO).unwrap();
        let cause = KillCause::Projectile;
        assert!(!damage_enemy(&mut ctx, h, ENEMY_HEALTH - 1.0, cause));
        assert!(damage_enemy(&mut ctx, h, 1.0, cause));
        assert!(!ctx.enemies.contains(h));
        assert_eq!(ctx.stats.kills, 1);
        assert_eq!(ctx.particles.len(), KILL_BURST_PARTICLES);
        assert!(!damage_enemy(&mut ctx, h, 1.0, cause));
    }

    #[test]
    fn certain_drops_respect_live_cap() {
        let mut ctx = context();
        ctx.tuning.drop_chance = 1.0;
        ctx.tuning.max_live_drops = 2;
        for _ in 0..4 {
            let h = ctx.enemies.add_entity(Vec3::ZERO).unwrap();
            kill_enemy(&mut ctx, h, KillCause::Projectile);
        }
        assert_eq!(ctx.live_drop_count(), 2);
    }

    #[test]
    fn contact_consumption_gives_no_experience() {
        let mut ctx = context();
        let h = ctx.enemies.add_entity(Vec3::ZERO).unwrap();
        assert!(consume_enemy(&mut ctx, h));
        assert_eq!(ctx.player.experience, 0);
        assert_eq!(ctx.stats.kills, 0);
        assert_eq!(ctx.stats.contacts, 1);
    }
}
