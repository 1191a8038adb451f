//! Snapshot system: reads the context and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the context.

use hecs::World;

use arena_core::components::{AbilityActor, Drop, Transform};
use arena_core::enums::AbilityKind;
use arena_core::events::GameEvent;
use arena_core::state::*;

use crate::context::SimulationContext;

/// Build a complete GameStateSnapshot from the current context.
pub fn build_snapshot(
    ctx: &SimulationContext,
    abilities: Vec<AbilityKind>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        player: PlayerView {
            position: ctx.player.position,
            rotation: ctx.player.rotation,
            visible: ctx.player.visual_ready,
            influence_radius: ctx.player.influence_radius,
        },
        enemies: build_enemies(ctx),
        enemy_capacity: ctx.enemies.capacity(),
        projectiles: ctx
            .projectiles
            .iter()
            .map(|(handle, p)| ProjectileView {
                slot: handle.index,
                position: p.position,
                velocity: p.velocity,
            })
            .collect(),
        particles: ctx
            .particles
            .iter()
            .map(|p| ParticleView {
                position: p.position,
                kind: p.kind,
                life_fraction: p.life_fraction(),
            })
            .collect(),
        drops: build_drops(&ctx.world),
        actors: build_actors(&ctx.world),
        camera_target: ctx.camera_target,
        hud: HudView {
            health: ctx.player.health,
            max_health: ctx.player.max_health,
            experience: ctx.player.experience,
            experience_threshold: ctx.player.experience_threshold,
            level: ctx.player.level,
            elapsed_secs: ctx.time.elapsed_secs,
            kills: ctx.stats.kills,
            abilities,
        },
        events,
    }
}

fn build_enemies(ctx: &SimulationContext) -> Vec<EnemyView> {
    ctx.enemies
        .iter()
        .map(|(handle, enemy)| EnemyView {
            slot: handle.index,
            position: enemy.position,
            health_fraction: if enemy.max_health > 0.0 {
                (enemy.health / enemy.max_health).clamp(0.0, 1.0)
            } else {
                0.0
            },
        })
        .collect()
}

fn build_drops(world: &World) -> Vec<DropView> {
    let mut drops: Vec<(hecs::Entity, DropView)> = world
        .query::<(&Transform, &Drop)>()
        .iter()
        .map(|(entity, (transform, drop))| {
            (
                entity,
                DropView {
                    position: transform.position,
                    rotation: transform.rotation,
                    grant: drop.grant,
                },
            )
        })
        .collect();
    // hecs archetype order is not spawn order once entities are recycled.
    drops.sort_by_key(|(entity, _)| entity.id());
    drops.into_iter().map(|(_, view)| view).collect()
}

fn build_actors(world: &World) -> Vec<ActorView> {
    let mut actors: Vec<(hecs::Entity, ActorView)> = world
        .query::<(&Transform, &AbilityActor)>()
        .iter()
        .map(|(entity, (transform, actor))| {
            (
                entity,
                ActorView {
                    kind: actor.kind,
                    shape: actor.shape,
                    position: transform.position,
                    rotation: transform.rotation,
                    radius: actor.radius,
                },
            )
        })
        .collect();
    actors.sort_by_key(|(entity, _)| entity.id());
    actors.into_iter().map(|(_, view)| view).collect()
}
