//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the `SimulationContext` and the player's ability
//! manager, processes queued commands, runs all systems in a fixed order and
//! produces `GameStateSnapshot`s. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;

use tracing::warn;

use arena_core::commands::{MovementIntent, PlayerCommand};
use arena_core::config::{SessionSettings, Tuning};
use arena_core::constants::DT;
use arena_core::enums::{AbilityKind, GamePhase};
use arena_core::events::GameEvent;
use arena_core::state::GameStateSnapshot;
use arena_core::types::{OwnerId, SimTime};

use crate::abilities::{AbilityError, AbilityManager};
use crate::context::{RunStats, SimulationContext};
use crate::systems;
use crate::systems::spawner::SpawnerState;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
    pub settings: SessionSettings,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_settings(SessionSettings::default(), Tuning::default())
    }
}

impl SimConfig {
    /// Config seeded from the settings blob.
    pub fn from_settings(settings: SessionSettings, tuning: Tuning) -> Self {
        Self {
            seed: settings.seed,
            tuning,
            settings,
        }
    }
}

/// The simulation engine. Owns the context and all sim state.
pub struct SimulationEngine {
    ctx: SimulationContext,
    abilities: AbilityManager,
    spawner: SpawnerState,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create a new run. The settings' starting ability is granted immediately;
    /// an unknown starting ability id is logged and the run starts without one.
    pub fn new(config: SimConfig) -> Self {
        let mut ctx = world_setup::build_context(&config);
        let mut abilities = AbilityManager::with_defaults(OwnerId::PLAYER);
        if let Err(err) = abilities.add_ability_by_id(config.settings.ability_index, &mut ctx) {
            warn!(%err, "starting ability not granted");
        }
        Self {
            ctx,
            abilities,
            spawner: SpawnerState::default(),
            command_queue: VecDeque::new(),
        }
    }

    /// Queue a player command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one default-length step and return the resulting snapshot.
    pub fn tick(&mut self, intent: MovementIntent) -> GameStateSnapshot {
        self.step(DT, intent);
        self.snapshot()
    }

    /// Advance by one fixed step of `dt` seconds. Commands are always
    /// processed; systems run only while the run is active.
    pub fn step(&mut self, dt: f32, intent: MovementIntent) {
        self.process_commands();

        if self.ctx.phase == GamePhase::Running {
            self.run_systems(dt, intent);
            self.ctx.time.advance(dt);
        }
    }

    /// Build a snapshot, handing over every event raised since the last one.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.ctx.events);
        systems::snapshot::build_snapshot(&self.ctx, self.abilities.list_active(), events)
    }

    /// Take pending events without building a snapshot.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.ctx.events)
    }

    /// Grant an ability outside the command queue.
    pub fn grant_ability(&mut self, kind: AbilityKind) -> Result<bool, AbilityError> {
        self.abilities.add_ability(kind, &mut self.ctx)
    }

    /// Revoke an ability outside the command queue. Returns false if it was not active.
    pub fn revoke_ability(&mut self, kind: AbilityKind) -> bool {
        self.abilities.remove_ability(kind, &mut self.ctx)
    }

    pub fn phase(&self) -> GamePhase {
        self.ctx.phase
    }

    pub fn time(&self) -> SimTime {
        self.ctx.time
    }

    pub fn stats(&self) -> &RunStats {
        &self.ctx.stats
    }

    pub fn abilities(&self) -> &AbilityManager {
        &self.abilities
    }

    /// Read-only view of the whole context.
    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    /// Mutable context, for hosts and tests that stage scenarios by hand.
    pub fn context_mut(&mut self) -> &mut SimulationContext {
        &mut self.ctx
    }

    /// Process all queued commands now. `step` also does this first thing,
    /// so hosts only call it to apply commands while no steps are running.
    pub fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                if self.ctx.phase == GamePhase::Running {
                    self.ctx.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.ctx.phase == GamePhase::Paused {
                    self.ctx.phase = GamePhase::Running;
                }
            }
            PlayerCommand::GrantAbility { kind } => {
                if self.ctx.phase == GamePhase::GameOver {
                    return;
                }
                if let Err(err) = self.abilities.add_ability(kind, &mut self.ctx) {
                    warn!(%err, "grant refused");
                }
            }
            PlayerCommand::RevokeAbility { kind } => {
                self.abilities.remove_ability(kind, &mut self.ctx);
            }
            PlayerCommand::PlayerVisualReady => {
                self.ctx.player.visual_ready = true;
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, intent: MovementIntent) {
        // 1. Input
        systems::movement::move_player(&mut self.ctx, intent, dt);
        // 2. Abilities (may spawn, despawn and query the index)
        self.abilities.update(dt, &mut self.ctx);
        // 3. Spawner
        systems::spawner::run(&mut self.ctx, &mut self.spawner, dt);
        // 4. Entity movement
        systems::movement::move_enemies(&mut self.ctx, dt);
        systems::movement::integrate_transients(&mut self.ctx, dt);
        systems::movement::update_drops(&mut self.ctx, dt);
        // 5. Collision (rebuilds the index)
        let pickups = systems::collision::run(&mut self.ctx);
        // 6. Pickup grants
        self.apply_pickups(pickups);
        // 7. Camera hand-off
        systems::movement::follow_camera(&mut self.ctx, dt);
    }

    fn apply_pickups(&mut self, pickups: Vec<AbilityKind>) {
        for grant in pickups {
            let granted = match self.abilities.add_ability(grant, &mut self.ctx) {
                Ok(granted) => granted,
                Err(err) => {
                    warn!(%err, "drop grant refused");
                    false
                }
            };
            let tick = self.ctx.time.tick;
            self.ctx.push_event(GameEvent::DropCollected {
                grant,
                granted,
                tick,
            });
        }
    }
}
