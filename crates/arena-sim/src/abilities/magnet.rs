//! Magnet: widens the owner's influence radius and pulls drops in.

use arena_core::components::{Drop, Transform};
use arena_core::config::Tuning;

use crate::context::SimulationContext;
use crate::systems::movement;

use super::{AbilityBehavior, OwnedEntities};

#[derive(Debug, Clone)]
pub struct MagnetState {
    radius_bonus: f32,
    pull_speed: f32,
    /// Whether the bonus is currently applied to the owner.
    applied: bool,
}

impl MagnetState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            radius_bonus: tuning.magnet_radius_bonus,
            pull_speed: tuning.magnet_pull_speed,
            applied: false,
        }
    }
}

impl AbilityBehavior for MagnetState {
    fn initialize(&mut self, _owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        ctx.player.influence_radius += self.radius_bonus;
        self.applied = true;
    }

    fn update(&mut self, dt: f32, _owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        let center = ctx.player.position;
        let radius_sq = ctx.player.influence_radius * ctx.player.influence_radius;
        let step = self.pull_speed * dt;
        for (_entity, (transform, _drop)) in ctx.world.query_mut::<(&mut Transform, &Drop)>() {
            if transform.position.distance_squared(center) <= radius_sq {
                transform.position = movement::step_toward(transform.position, center, step);
            }
        }
    }

    fn cleanup(&mut self, _owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        if self.applied {
            ctx.player.influence_radius -= self.radius_bonus;
            self.applied = false;
        }
    }
}
