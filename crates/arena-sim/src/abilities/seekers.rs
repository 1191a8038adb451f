//! Seekers: a small swarm of homing bots.
//!
//! Each bot homes on the nearest enemy it has not hit yet, damages it on
//! contact, and retires once its hit budget or lifetime runs out. Lost bots
//! are replaced one at a time on a cooldown. Idle bots orbit the owner.

use std::collections::HashSet;
use std::f32::consts::TAU;

use glam::Vec3;

use arena_core::config::Tuning;
use arena_core::constants::SEEKER_IDLE_RADIUS;
use arena_core::enums::{AbilityKind, ActorShape, KillCause};
use arena_core::types::{heading_of, planar_direction, SlotHandle};

use crate::context::SimulationContext;
use crate::systems::{combat, movement};

use super::owned::sync_actor;
use super::{AbilityBehavior, OwnedEntities};

/// Orbit angular speed of idle bots (rad/s).
const ORBIT_RATE: f32 = 2.0;

#[derive(Debug, Clone)]
struct SeekerBot {
    entity: hecs::Entity,
    position: Vec3,
    life: f32,
    hits_left: u32,
    target: Option<SlotHandle>,
    affected: HashSet<SlotHandle>,
}

impl SeekerBot {
    fn spent(&self) -> bool {
        self.hits_left == 0 || self.life <= 0.0
    }
}

#[derive(Debug, Clone)]
pub struct SeekersState {
    count: usize,
    speed: f32,
    lifetime: f32,
    hit_radius: f32,
    damage: f32,
    hit_budget: u32,
    acquire_range: f32,
    respawn: f32,
    respawn_timer: f32,
    orbit_phase: f32,
    bots: Vec<SeekerBot>,
}

impl SeekersState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            count: tuning.seeker_count,
            speed: tuning.seeker_speed,
            lifetime: tuning.seeker_lifetime,
            hit_radius: tuning.seeker_hit_radius,
            damage: tuning.seeker_damage,
            hit_budget: tuning.seeker_hit_budget.max(1),
            acquire_range: tuning.seeker_acquire_range,
            respawn: tuning.seeker_respawn,
            respawn_timer: tuning.seeker_respawn,
            orbit_phase: 0.0,
            bots: Vec::new(),
        }
    }

    pub fn bot_count(&self) -> usize {
        self.bots.len()
    }

    fn launch(&mut self, owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        let position = ctx.player.position;
        let entity = owned.spawn_actor(
            ctx,
            AbilityKind::Seekers,
            ActorShape::Seeker,
            position,
            self.hit_radius,
        );
        self.bots.push(SeekerBot {
            entity,
            position,
            life: self.lifetime,
            hits_left: self.hit_budget,
            target: None,
            affected: HashSet::new(),
        });
    }
}

impl AbilityBehavior for SeekersState {
    fn initialize(&mut self, owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        for _ in 0..self.count {
            self.launch(owned, ctx);
        }
        self.respawn_timer = self.respawn;
    }

    fn update(&mut self, dt: f32, owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        self.orbit_phase = (self.orbit_phase + ORBIT_RATE * dt).rem_euclid(TAU);
        let owner = ctx.player.position;
        let step = self.speed * dt;
        let hit_sq = self.hit_radius * self.hit_radius;
        let slots = self.count.max(1) as f32;

        for (i, bot) in self.bots.iter_mut().enumerate() {
            bot.life -= dt;

            if bot.target.is_some_and(|t| !ctx.enemies.contains(t)) {
                bot.target = None;
            }
            if bot.target.is_none() {
                bot.target = combat::nearest_enemy(ctx, bot.position, self.acquire_range, |h| {
                    bot.affected.contains(&h)
                })
                .map(|(h, _)| h);
            }

            let previous = bot.position;
            let target = bot
                .target
                .and_then(|t| ctx.enemies.get(t).map(|e| (t, e.position)));
            match target {
                Some((handle, target_pos)) => {
                    bot.position = movement::step_toward(bot.position, target_pos, step);
                    if bot.position.distance_squared(target_pos) <= hit_sq {
                        bot.affected.insert(handle);
                        bot.hits_left = bot.hits_left.saturating_sub(1);
                        bot.target = None;
                        combat::damage_enemy(
                            ctx,
                            handle,
                            self.damage,
                            KillCause::Ability(AbilityKind::Seekers),
                        );
                    }
                }
                None => {
                    let angle = self.orbit_phase + i as f32 * TAU / slots;
                    let idle = owner + planar_direction(angle) * SEEKER_IDLE_RADIUS;
                    bot.position = movement::step_toward(bot.position, idle, step);
                }
            }

            let heading = heading_of(bot.position - previous);
            sync_actor(&mut ctx.world, bot.entity, bot.position, heading, self.hit_radius);
        }

        self.bots.retain(|bot| {
            if bot.spent() {
                owned.despawn_actor(ctx, bot.entity);
                false
            } else {
                true
            }
        });

        if self.bots.len() < self.count {
            self.respawn_timer -= dt;
            if self.respawn_timer <= 0.0 {
                self.launch(owned, ctx);
                self.respawn_timer = self.respawn;
            }
        } else {
            self.respawn_timer = self.respawn;
        }
    }

    fn cleanup(&mut self, _owned: &mut OwnedEntities, _ctx: &mut SimulationContext) {
        self.bots.clear();
    }
}
