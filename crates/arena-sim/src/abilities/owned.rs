//! Ledger of everything an ability instance created.

use glam::Vec3;
use hecs::{Entity, World};

use arena_core::components::{AbilityActor, Transform};
use arena_core::enums::{AbilityKind, ActorShape};
use arena_core::types::SlotHandle;

use crate::context::SimulationContext;

/// Actor entities and in-flight projectiles owned by one ability instance.
#[derive(Debug, Default)]
pub struct OwnedEntities {
    actors: Vec<Entity>,
    projectiles: Vec<SlotHandle>,
}

impl OwnedEntities {
    /// Spawn a renderable actor and record it.
    pub fn spawn_actor(
        &mut self,
        ctx: &mut SimulationContext,
        kind: AbilityKind,
        shape: ActorShape,
        position: Vec3,
        radius: f32,
    ) -> Entity {
        let entity = ctx.world.spawn((
            Transform {
                position,
                rotation: 0.0,
            },
            AbilityActor {
                kind,
                shape,
                radius,
            },
        ));
        self.actors.push(entity);
        entity
    }

    /// Despawn one of this ledger's actors.
    pub fn despawn_actor(&mut self, ctx: &mut SimulationContext, entity: Entity) -> bool {
        let Some(i) = self.actors.iter().position(|&e| e == entity) else {
            return false;
        };
        self.actors.remove(i);
        ctx.world.despawn(entity).is_ok()
    }

    /// Fire a projectile from the shared pool and record it.
    pub fn fire_projectile(
        &mut self,
        ctx: &mut SimulationContext,
        position: Vec3,
        velocity: Vec3,
        lifetime: f32,
    ) -> Option<SlotHandle> {
        let handle = ctx.projectiles.fire(position, velocity, lifetime)?;
        self.projectiles.push(handle);
        Some(handle)
    }

    /// Forget projectiles that already expired or hit.
    pub fn prune(&mut self, ctx: &SimulationContext) {
        self.projectiles.retain(|&h| ctx.projectiles.contains(h));
    }

    /// Despawn every actor and return every projectile still in flight.
    pub fn release_all(&mut self, ctx: &mut SimulationContext) {
        for entity in self.actors.drain(..) {
            let _ = ctx.world.despawn(entity);
        }
        for handle in self.projectiles.drain(..) {
            ctx.projectiles.release(handle);
        }
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }
}

/// Copy a sub-entity's simulated placement onto its render actor.
pub fn sync_actor(world: &mut World, entity: Entity, position: Vec3, rotation: f32, radius: f32) {
    if let Ok((transform, actor)) = world.query_one_mut::<(&mut Transform, &mut AbilityActor)>(entity) {
        transform.position = position;
        transform.rotation = rotation;
        actor.radius = radius;
    }
}
