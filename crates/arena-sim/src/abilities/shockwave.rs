//! Shockwave: periodic expanding rings around the owner.
//!
//! A ring damages and knocks back each enemy once as its front passes, then
//! retires at its maximum radius.

use std::collections::HashSet;

use glam::Vec3;

use arena_core::config::Tuning;
use arena_core::enums::{AbilityKind, ActorShape, KillCause};
use arena_core::types::SlotHandle;

use crate::context::SimulationContext;
use crate::systems::combat;

use super::owned::sync_actor;
use super::{AbilityBehavior, OwnedEntities};

#[derive(Debug, Clone)]
struct Ring {
    entity: hecs::Entity,
    center: Vec3,
    radius: f32,
    affected: HashSet<SlotHandle>,
}

#[derive(Debug, Clone)]
pub struct ShockwaveState {
    cooldown: f32,
    expansion_speed: f32,
    max_radius: f32,
    damage: f32,
    knockback: f32,
    timer: f32,
    rings: Vec<Ring>,
    hits: Vec<SlotHandle>,
}

impl ShockwaveState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            cooldown: tuning.shockwave_cooldown,
            expansion_speed: tuning.shockwave_expansion_speed,
            max_radius: tuning.shockwave_max_radius,
            damage: tuning.shockwave_damage,
            knockback: tuning.shockwave_knockback,
            timer: 0.0,
            rings: Vec::new(),
            hits: Vec::new(),
        }
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }
}

impl AbilityBehavior for ShockwaveState {
    fn initialize(&mut self, _owned: &mut OwnedEntities, _ctx: &mut SimulationContext) {
        self.timer = 0.0;
    }

    fn update(&mut self, dt: f32, owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        self.timer -= dt;
        if self.timer <= 0.0 {
            let center = ctx.player.position;
            let entity = owned.spawn_actor(ctx, AbilityKind::Shockwave, ActorShape::Ring, center, 0.0);
            self.rings.push(Ring {
                entity,
                center,
                radius: 0.0,
                affected: HashSet::new(),
            });
            self.timer += self.cooldown.max(dt);
        }

        let walkable = ctx.walkable;
        for ring in self.rings.iter_mut() {
            ring.radius = (ring.radius + self.expansion_speed * dt).min(self.max_radius);
            combat::enemies_within(ctx, ring.center, ring.radius, &mut self.hits);

            for &handle in &self.hits {
                if !ring.affected.insert(handle) {
                    continue;
                }
                if let Some(enemy) = ctx.enemies.get_mut(handle) {
                    let away = (enemy.position - ring.center).normalize_or(Vec3::X);
                    enemy.position = walkable.clamp(enemy.position + away * self.knockback);
                }
                combat::damage_enemy(
                    ctx,
                    handle,
                    self.damage,
                    KillCause::Ability(AbilityKind::Shockwave),
                );
            }
            sync_actor(&mut ctx.world, ring.entity, ring.center, 0.0, ring.radius);
        }

        let max_radius = self.max_radius;
        self.rings.retain(|ring| {
            if ring.radius >= max_radius {
                owned.despawn_actor(ctx, ring.entity);
                false
            } else {
                true
            }
        });
    }

    fn cleanup(&mut self, _owned: &mut OwnedEntities, _ctx: &mut SimulationContext) {
        self.rings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimConfig;
    use crate::world_setup;

    #[test]
    fn ring_hits_once_pushes_back_and_retires() {
        let mut config = SimConfig::default();
        config.tuning.drop_chance = 0.0;
        config.tuning.enemy_health = 10.0;
        let mut ctx = world_setup::build_context(&config);
        let mut shock = ShockwaveState::new(&ctx.tuning);
        let mut owned = OwnedEntities::default();

        let enemy = ctx.enemies.add_entity(Vec3::new(3.0, 0.0, 0.0)).unwrap();
        ctx.rebuild_index();
        shock.initialize(&mut owned, &mut ctx);

        // Max radius 8 at 12 m/s: the ring lives under a second.
        for _ in 0..60 {
            shock.update(1.0 / 60.0, &mut owned, &mut ctx);
        }

        let hit = ctx.enemies.get(enemy).unwrap();
        assert_eq!(hit.health, 10.0 - ctx.tuning.shockwave_damage);
        assert!((hit.position.x - (3.0 + ctx.tuning.shockwave_knockback)).abs() < 1e-4);
        assert_eq!(shock.ring_count(), 0);
        assert_eq!(ctx.live_actor_count(), 0);
    }
}
