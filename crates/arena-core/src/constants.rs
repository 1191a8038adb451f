//! Simulation constants and tuning defaults.
//!
//! Every threshold used by collision and abilities is named here and copied
//! into [`crate::config::Tuning`], which is what the simulation reads.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Most catch-up steps the fixed-step loop will bank before dropping time.
pub const MAX_CATCH_UP_STEPS: u32 = 5;

// --- World bounds ---

/// Vertical half extent of the arena volume (meters). Entities live near y = 0.
pub const ARENA_HALF_HEIGHT: f32 = 16.0;

/// Keep the player this far inside the arena edge.
pub const ARENA_EDGE_MARGIN: f32 = 1.0;

// --- Pools ---

/// Enemy pool capacity (max live enemies).
pub const ENEMY_POOL_CAPACITY: usize = 200;

/// Projectile pool capacity.
pub const PROJECTILE_POOL_CAPACITY: usize = 128;

/// Particle pool capacity.
pub const PARTICLE_POOL_CAPACITY: usize = 512;

/// Live drop cap. Extra drop rolls are discarded while at the cap.
pub const MAX_LIVE_DROPS: usize = 32;

// --- Spatial index ---

/// Points a node holds before it subdivides.
pub const OCTREE_NODE_CAPACITY: usize = 8;

/// Depth below which nodes stop subdividing.
pub const OCTREE_MAX_DEPTH: u32 = 8;

// --- Collision thresholds (meters) ---

/// Player-enemy contact distance.
pub const PLAYER_CONTACT_RADIUS: f32 = 0.9;

/// Projectile-enemy hit distance.
pub const PROJECTILE_HIT_RADIUS: f32 = 0.7;

/// Player-drop pickup distance.
pub const DROP_PICKUP_RADIUS: f32 = 1.2;

// --- Player defaults ---

/// Starting experience threshold for the first level up.
pub const BASE_EXPERIENCE_THRESHOLD: u32 = 5;

/// Threshold growth factor applied on every level up.
pub const EXPERIENCE_THRESHOLD_GROWTH: f32 = 1.5;

/// Experience granted per kill.
pub const EXPERIENCE_PER_KILL: u32 = 1;

/// Speed at which drops inside the influence radius drift toward the player (m/s).
pub const DROP_ATTRACT_SPEED: f32 = 6.0;

/// Camera follow rate (1/s). Higher is snappier.
pub const CAMERA_FOLLOW_RATE: f32 = 8.0;

// --- Enemies ---

/// Hit points of a freshly spawned enemy.
pub const ENEMY_HEALTH: f32 = 3.0;

/// Distance from the player at which enemies spawn (meters).
pub const ENEMY_SPAWN_RADIUS: f32 = 22.0;

/// Probability that a killed enemy leaves a drop.
pub const DROP_CHANCE: f64 = 0.08;

/// Drop spin rate range (rad/s).
pub const DROP_SPIN_MIN: f32 = 1.0;
pub const DROP_SPIN_MAX: f32 = 3.0;

// --- Particles ---

/// Particles emitted when an enemy dies.
pub const KILL_BURST_PARTICLES: usize = 8;

/// Particles emitted on a pickup.
pub const PICKUP_BURST_PARTICLES: usize = 12;

/// Particles emitted when an enemy spawns.
pub const SPAWN_BURST_PARTICLES: usize = 3;

/// Base particle lifetime (seconds).
pub const PARTICLE_LIFETIME: f32 = 0.6;

/// Base particle speed (m/s).
pub const PARTICLE_SPEED: f32 = 4.0;

/// Downward acceleration for gravity particles (m/s²).
pub const PARTICLE_GRAVITY: f32 = 9.81;

/// Velocity damping factor for damped particles (1/s).
pub const PARTICLE_DAMPING: f32 = 3.0;

// --- Blaster ---

pub const BLASTER_COOLDOWN_SECS: f32 = 0.5;
pub const BLASTER_RANGE: f32 = 18.0;
pub const BLASTER_PROJECTILE_SPEED: f32 = 30.0;
pub const BLASTER_PROJECTILE_LIFETIME: f32 = 1.2;

// --- Trail ---

/// Seconds between trail segments while the owner moves.
pub const TRAIL_SEGMENT_INTERVAL_SECS: f32 = 0.15;
pub const TRAIL_SEGMENT_LIFETIME_SECS: f32 = 2.0;
pub const TRAIL_SEGMENT_RADIUS: f32 = 1.0;
pub const TRAIL_DAMAGE: f32 = 1.0;
/// Live segment cap per trail; the oldest segment retires first.
pub const TRAIL_MAX_SEGMENTS: usize = 24;
/// Minimum owner displacement per tick that counts as moving.
pub const TRAIL_MIN_STEP: f32 = 0.001;

// --- Seekers ---

pub const SEEKER_COUNT: usize = 3;
pub const SEEKER_SPEED: f32 = 14.0;
pub const SEEKER_LIFETIME_SECS: f32 = 6.0;
pub const SEEKER_HIT_RADIUS: f32 = 0.8;
pub const SEEKER_DAMAGE: f32 = 2.0;
/// Hits a bot may land before it retires.
pub const SEEKER_HIT_BUDGET: u32 = 3;
pub const SEEKER_ACQUIRE_RANGE: f32 = 20.0;
pub const SEEKER_RESPAWN_SECS: f32 = 2.0;
/// Orbit radius of idle bots around the owner.
pub const SEEKER_IDLE_RADIUS: f32 = 1.5;

// --- Shockwave ---

pub const SHOCKWAVE_COOLDOWN_SECS: f32 = 3.0;
pub const SHOCKWAVE_EXPANSION_SPEED: f32 = 12.0;
pub const SHOCKWAVE_MAX_RADIUS: f32 = 8.0;
pub const SHOCKWAVE_DAMAGE: f32 = 2.0;
pub const SHOCKWAVE_KNOCKBACK: f32 = 2.0;

// --- Magnet ---

pub const MAGNET_RADIUS_BONUS: f32 = 6.0;
pub const MAGNET_PULL_SPEED: f32 = 10.0;
