//! Blaster: fires pooled projectiles at the nearest enemy on a cooldown.

use tracing::debug;

use arena_core::config::Tuning;

use crate::context::SimulationContext;
use crate::systems::combat;

use super::{AbilityBehavior, OwnedEntities};

#[derive(Debug, Clone)]
pub struct BlasterState {
    cooldown: f32,
    range: f32,
    projectile_speed: f32,
    projectile_lifetime: f32,
    /// Seconds until the next shot. Fires as soon as it reaches zero and a target exists.
    timer: f32,
}

impl BlasterState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            cooldown: tuning.blaster_cooldown,
            range: tuning.blaster_range,
            projectile_speed: tuning.blaster_projectile_speed,
            projectile_lifetime: tuning.blaster_projectile_lifetime,
            timer: 0.0,
        }
    }
}

impl AbilityBehavior for BlasterState {
    fn initialize(&mut self, _owned: &mut OwnedEntities, _ctx: &mut SimulationContext) {
        self.timer = 0.0;
    }

    fn update(&mut self, dt: f32, owned: &mut OwnedEntities, ctx: &mut SimulationContext) {
        self.timer = (self.timer - dt).max(0.0);
        if self.timer > 0.0 {
            return;
        }

        let origin = ctx.player.position;
        let Some((_, target)) = combat::nearest_enemy(ctx, origin, self.range, |_| false) else {
            return;
        };
        let direction = (target - origin).normalize_or_zero();
        if direction == glam::Vec3::ZERO {
            return;
        }

        let velocity = direction * self.projectile_speed;
        match owned.fire_projectile(ctx, origin, velocity, self.projectile_lifetime) {
            Some(_) => ctx.stats.projectiles_fired += 1,
            None => debug!("projectile pool exhausted, shot skipped"),
        }
        self.timer = self.cooldown;
    }

    fn cleanup(&mut self, _owned: &mut OwnedEntities, _ctx: &mut SimulationContext) {}
}
