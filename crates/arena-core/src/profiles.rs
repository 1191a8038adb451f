//! Class- and world-specific profiles.
//!
//! Consolidates the per-class player stats and per-world arena pacing that
//! the settings blob selects between.

use crate::enums::{PlayerClass, WorldKind};

/// Starting stats for a player class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProfile {
    /// Movement speed (m/s).
    pub speed: f32,
    pub max_health: f32,
    /// Chance in [0, 1] to ignore a hit.
    pub evasion: f64,
    /// Radius inside which drops drift toward the player (m).
    pub influence_radius: f32,
}

/// Get the profile for a player class.
pub fn class_profile(class: PlayerClass) -> ClassProfile {
    match class {
        PlayerClass::Runner => ClassProfile {
            speed: 8.0,
            max_health: 5.0,
            evasion: 0.0,
            influence_radius: 3.0,
        },
        PlayerClass::Tank => ClassProfile {
            speed: 6.0,
            max_health: 8.0,
            evasion: 0.0,
            influence_radius: 2.5,
        },
        PlayerClass::Ghost => ClassProfile {
            speed: 9.0,
            max_health: 3.0,
            evasion: 0.25,
            influence_radius: 4.0,
        },
    }
}

/// One step of the spawn pacing schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPhase {
    /// Elapsed seconds at which this phase takes over.
    pub start_secs: f32,
    /// Seconds between spawn batches.
    pub interval_secs: f32,
    /// Enemies per batch.
    pub batch: usize,
}

/// Arena layout and enemy pacing for a world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldProfile {
    /// Half width of the square arena floor (m).
    pub half_extent: f32,
    /// Enemy seek speed (m/s).
    pub enemy_speed: f32,
    pub spawn_schedule: &'static [SpawnPhase],
}

const PLAINS_SCHEDULE: &[SpawnPhase] = &[
    SpawnPhase { start_secs: 0.0, interval_secs: 1.0, batch: 2 },
    SpawnPhase { start_secs: 20.0, interval_secs: 0.8, batch: 3 },
    SpawnPhase { start_secs: 60.0, interval_secs: 0.6, batch: 4 },
    SpawnPhase { start_secs: 120.0, interval_secs: 0.4, batch: 6 },
];

const CRATER_SCHEDULE: &[SpawnPhase] = &[
    SpawnPhase { start_secs: 0.0, interval_secs: 0.8, batch: 2 },
    SpawnPhase { start_secs: 30.0, interval_secs: 0.5, batch: 4 },
    SpawnPhase { start_secs: 90.0, interval_secs: 0.3, batch: 6 },
];

const HIVE_SCHEDULE: &[SpawnPhase] = &[
    SpawnPhase { start_secs: 0.0, interval_secs: 0.5, batch: 3 },
    SpawnPhase { start_secs: 15.0, interval_secs: 0.4, batch: 5 },
    SpawnPhase { start_secs: 45.0, interval_secs: 0.25, batch: 8 },
];

/// Get the profile for a world.
pub fn world_profile(world: WorldKind) -> WorldProfile {
    match world {
        WorldKind::Plains => WorldProfile {
            half_extent: 60.0,
            enemy_speed: 3.0,
            spawn_schedule: PLAINS_SCHEDULE,
        },
        WorldKind::Crater => WorldProfile {
            half_extent: 40.0,
            enemy_speed: 3.5,
            spawn_schedule: CRATER_SCHEDULE,
        },
        WorldKind::Hive => WorldProfile {
            half_extent: 50.0,
            enemy_speed: 4.0,
            spawn_schedule: HIVE_SCHEDULE,
        },
    }
}

impl WorldProfile {
    /// The spawn phase in effect at `elapsed_secs`.
    pub fn spawn_phase_at(&self, elapsed_secs: f32) -> SpawnPhase {
        self.spawn_schedule
            .iter()
            .rev()
            .find(|phase| elapsed_secs >= phase.start_secs)
            .or_else(|| self.spawn_schedule.first())
            .copied()
            .unwrap_or(SpawnPhase {
                start_secs: 0.0,
                interval_secs: 1.0,
                batch: 1,
            })
    }
}
