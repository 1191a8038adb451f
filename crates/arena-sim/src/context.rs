//! The shared mutable state every system and ability works on.
//!
//! One `SimulationContext` owns the pools, the spatial index, the hecs world
//! for drops and ability actors, the player and the run's RNG. It is passed
//! by `&mut` into each update and only mutated inside a step or command.

use glam::Vec3;
use hecs::World;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use arena_core::config::Tuning;
use arena_core::enums::GamePhase;
use arena_core::events::GameEvent;
use arena_core::profiles::WorldProfile;
use arena_core::types::{Aabb, SimTime, SlotHandle};

use crate::player::Player;
use crate::pool::{EnemyPool, ParticlePool, ProjectilePool};
use crate::spatial::Octree;

/// Running counters for the HUD and the end-of-run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub kills: u32,
    pub projectiles_fired: u32,
    pub drops_collected: u32,
    pub contacts: u32,
}

pub struct SimulationContext {
    pub tuning: Tuning,
    pub world_profile: WorldProfile,
    /// Fixed arena volume. Also the spatial index bound.
    pub arena: Aabb,
    /// `arena` inset by the edge margin, for clamping walkers.
    pub walkable: Aabb,

    pub player: Player,
    pub enemies: EnemyPool,
    pub projectiles: ProjectilePool,
    pub particles: ParticlePool,
    /// Enemy positions as of the last collision pass.
    pub index: Octree<SlotHandle>,
    /// Drops and ability actors.
    pub world: World,

    pub rng: ChaCha8Rng,
    pub time: SimTime,
    pub phase: GamePhase,
    pub camera_target: Vec3,
    pub stats: RunStats,
    /// Events raised since the last snapshot.
    pub events: Vec<GameEvent>,
}

impl SimulationContext {
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Move the run to game over. Only the first call has any effect.
    pub fn end_run(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        info!(
            tick = self.time.tick,
            kills = self.stats.kills,
            level = self.player.level,
            "game over"
        );
        self.push_event(GameEvent::GameOver {
            tick: self.time.tick,
            elapsed_secs: self.time.elapsed_secs,
            kills: self.stats.kills,
            level: self.player.level,
        });
    }

    /// Clear the index and reinsert every live enemy in slot order.
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for (handle, enemy) in self.enemies.iter() {
            self.index.insert(enemy.position, handle);
        }
    }

    pub fn live_drop_count(&self) -> usize {
        self.world
            .query::<&arena_core::components::Drop>()
            .iter()
            .count()
    }

    pub fn live_actor_count(&self) -> usize {
        self.world
            .query::<&arena_core::components::AbilityActor>()
            .iter()
            .count()
    }
}
