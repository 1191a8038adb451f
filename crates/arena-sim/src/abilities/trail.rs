//! Trail: damaging segments laid behind the moving owner.
//!
//! Each segment hits a given enemy at most once during its lifetime. Its
//! affected set goes away with it.

use std::collections::{HashSet, VecDeque};

use glam::Vec3;

use arena_core::config::Tuning;
use arena_core::constants::TRAIL_MIN_STEP;
use arena_core::enums::{AbilityKind, ActorShape, KillCause};
use arena_core::types::SlotHandle;

use crate::context::SimulationContext;
use crate::systems::combat;

use super::owned::sync_actor;
use super::{AbilityBehavior, OwnedEntities};

#[derive(Debug, Clone)]
struct TrailSegment {
    entity: hecs::Entity,
    position: Vec3,
    remaining: f32,
    affected: HashSet<SlotHandle>,
}

#[derive(Debug, Clone)]
pub struct TrailState {
    interval: f32,
    lifetime: f32,
    radius: f32,
    damage: f32,
    max_segments: usize,
    timer: f32,
    last_position: Vec3,
    /// Oldest first.
    segments: VecDeque<TrailSegment>,
    hits: Vec<SlotHandle>,
}

impl TrailState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            interval: tuning.trail_segment_interval,
            lifetime: tuning.trail_segment_lifetime,
            radius: tuning.trail_segment_radius,
            damage: tuning.trail_damage,
            max_segments: tuning.trail_max_segments.max(1),
            timer: 0.0,
            last_position: Vec3::ZERO,
            segments: VecDeque::new(),
            hits: Vec::new(),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn lay(&mut self, position: Vec3, owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        if self.segments.len() >= self.max_segments {
            if let Some(oldest) = self.segments.pop_front() {
                owned.despawn_actor(ctx, oldest.entity);
            }
        }
        let entity = owned.spawn_actor(
            ctx,
            AbilityKind::Trail,
            ActorShape::TrailSegment,
            position,
            self.radius,
        );
        self.segments.push_back(TrailSegment {
            entity,
            position,
            remaining: self.lifetime,
            affected: HashSet::new(),
        });
    }
}

impl AbilityBehavior for TrailState {
    fn initialize(&mut self, owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        self.last_position = ctx.player.position;
        self.timer = self.interval;
        let at = self.last_position;
        self.lay(at, owned, ctx);
    }

    fn update(&mut self, dt: f32, owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        let position = ctx.player.position;
        let moved = position.distance(self.last_position) > TRAIL_MIN_STEP;
        self.timer -= dt;
        if moved && self.timer <= 0.0 {
            let behind = self.last_position;
            self.lay(behind, owned, ctx);
            self.timer = self.interval;
        }
        self.last_position = position;

        for segment in self.segments.iter_mut() {
            segment.remaining -= dt;
        }
        while self
            .segments
            .front()
            .is_some_and(|segment| segment.remaining <= 0.0)
        {
            if let Some(expired) = self.segments.pop_front() {
                owned.despawn_actor(ctx, expired.entity);
            }
        }

        for segment in self.segments.iter_mut() {
            combat::enemies_within(ctx, segment.position, self.radius, &mut self.hits);
            for &handle in &self.hits {
                if segment.affected.insert(handle) {
                    combat::damage_enemy(ctx, handle, self.damage, KillCause::Ability(AbilityKind::Trail));
                }
            }
            let fade = (segment.remaining / self.lifetime).clamp(0.0, 1.0);
            sync_actor(&mut ctx.world, segment.entity, segment.position, 0.0, self.radius * fade);
        }
    }

    fn cleanup(&mut self, _owned: &mut OwnedEntities, _ctx: &mut SimulationContext) {
        // Actors go with the ledger.
        self.segments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimConfig;
    use crate::world_setup;

    fn setup() -> (SimulationContext, TrailState, OwnedEntities) {
        let mut config = SimConfig::default();
        config.tuning.drop_chance = 0.0;
        config.tuning.trail_damage = 1.0;
        let ctx = world_setup::build_context(&config);
        let state = TrailState::new(&ctx.tuning);
        (ctx, state, OwnedEntities::default())
    }

    #[test]
    fn standing_still_lays_no_new_segments() {
        let (mut ctx, mut trail, mut owned) = setup();
        trail.initialize(&mut owned, &mut ctx);
        for _ in 0..30 {
            trail.update(1.0 / 60.0, &mut owned, &mut ctx);
        }
        assert_eq!(trail.segment_count(), 1);
    }

    #[test]
    fn moving_lays_segments_up_to_cap() {
        let (mut ctx, mut trail, mut owned) = setup();
        trail.max_segments = 4;
        trail.initialize(&mut owned, &mut ctx);
        for i in 0..120 {
            ctx.player.position.x = i as f32 * 0.1;
            trail.update(1.0 / 60.0, &mut owned, &mut ctx);
        }
        assert_eq!(trail.segment_count(), 4);
        assert_eq!(owned.actor_count(), 4);
        assert_eq!(ctx.live_actor_count(), 4);
    }

    #[test]
    fn segment_hits_each_enemy_once() {
        let (mut ctx, mut trail, mut owned) = setup();
        trail.initialize(&mut owned, &mut ctx);
        let enemy = ctx.enemies.add_entity(Vec3::new(0.3, 0.0, 0.0)).unwrap();
        ctx.rebuild_index();

        for _ in 0..10 {
            trail.update(1.0 / 60.0, &mut owned, &mut ctx);
        }
        let health = ctx.enemies.get(enemy).unwrap().health;
        assert_eq!(health, ctx.tuning.enemy_health - 1.0);
    }

    #[test]
    fn segments_expire() {
        let (mut ctx, mut trail, mut owned) = setup();
        trail.initialize(&mut owned, &mut ctx);
        let steps = (ctx.tuning.trail_segment_lifetime * 60.0) as usize + 2;
        for _ in 0..steps {
            trail.update(1.0 / 60.0, &mut owned, &mut ctx);
        }
        assert_eq!(trail.segment_count(), 0);
        assert_eq!(ctx.live_actor_count(), 0);
    }
}
