//! Headless game loop: drives the engine through a `FixedStepLoop`.
//!
//! Frame time comes from a `FrameClock`. `WallClock` paces frames in real
//! time with sleeps; `VirtualClock` returns a fixed frame length instantly,
//! which makes whole runs reproducible and fast. Input is sampled from the
//! `Autopilot` once per fixed step.
//!
//! Commands arrive via `mpsc` channel and are applied at frame boundaries.
//! The engine's phase is authoritative for pausing: the loop is paused and
//! resumed to match it, so time spent paused is never replayed.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use glam::Vec3;
use tracing::info;

use arena_core::commands::{MovementIntent, PlayerCommand};
use arena_core::components::{Drop, Transform};
use arena_core::constants::TICK_RATE;
use arena_core::enums::GamePhase;
use arena_sim::context::{RunStats, SimulationContext};
use arena_sim::{FixedStepLoop, LoopState, SimulationEngine};

use crate::presenter::Presenter;

/// Nominal duration of one frame at the tick rate.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Enemies closer than this dominate the autopilot's steering.
const THREAT_RADIUS: f32 = 8.0;

/// Source of per-frame elapsed time.
pub trait FrameClock {
    /// Block until the next frame is due and return the time since the last one.
    fn next_frame(&mut self) -> Duration;
}

/// Real time, paced to `frame` with sleeps.
#[derive(Debug)]
pub struct WallClock {
    frame: Duration,
    last: Instant,
    next_frame_time: Instant,
}

impl WallClock {
    pub fn new(frame: Duration) -> Self {
        let now = Instant::now();
        Self {
            frame,
            last: now,
            next_frame_time: now + frame,
        }
    }
}

impl FrameClock for WallClock {
    fn next_frame(&mut self) -> Duration {
        let now = Instant::now();
        if self.next_frame_time > now {
            std::thread::sleep(self.next_frame_time - now);
        } else if now - self.next_frame_time > self.frame * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            self.next_frame_time = now;
        }
        self.next_frame_time += self.frame;

        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }
}

/// Fixed frame length, no sleeping.
#[derive(Debug, Clone, Copy)]
pub struct VirtualClock {
    pub frame: Duration,
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self {
            frame: FRAME_DURATION,
        }
    }
}

impl FrameClock for VirtualClock {
    fn next_frame(&mut self) -> Duration {
        self.frame
    }
}

/// Scripted stand-in for a human: flees nearby enemies, otherwise heads for
/// the nearest drop, otherwise drifts back toward the arena center.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn steer(&self, ctx: &SimulationContext) -> MovementIntent {
        let origin = ctx.player.position;

        let mut threat = Vec3::ZERO;
        for (_, enemy) in ctx.enemies.iter() {
            let away = origin - enemy.position;
            let distance = away.length();
            if distance > 1e-3 && distance < THREAT_RADIUS {
                threat += away / (distance * distance);
            }
        }

        let desired = if threat != Vec3::ZERO {
            threat
        } else if let Some(target) = nearest_drop(ctx, origin) {
            target - origin
        } else {
            -origin
        };
        intent_toward(desired)
    }
}

fn nearest_drop(ctx: &SimulationContext, origin: Vec3) -> Option<Vec3> {
    ctx.world
        .query::<(&Transform, &Drop)>()
        .iter()
        .map(|(_, (transform, _))| transform.position)
        .min_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)))
}

/// Quantize a planar direction onto the four movement keys.
fn intent_toward(direction: Vec3) -> MovementIntent {
    const DEADZONE: f32 = 0.25;
    let planar = Vec3::new(direction.x, 0.0, direction.z);
    if planar.length_squared() < 1e-4 {
        return MovementIntent::IDLE;
    }
    let dir = planar.normalize();
    MovementIntent {
        forward: dir.z > DEADZONE,
        back: dir.z < -DEADZONE,
        right: dir.x > DEADZONE,
        left: dir.x < -DEADZONE,
    }
}

/// Commands sent to the game loop from outside.
#[derive(Debug)]
pub enum HostCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Stop the loop after the current frame.
    Shutdown,
}

/// Host run limits.
#[derive(Debug, Clone, Copy)]
pub struct HostOptions {
    /// Stop after this many simulation ticks. `None` runs until game over.
    pub max_ticks: Option<u64>,
}

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub phase: GamePhase,
    pub level: u32,
    pub stats: RunStats,
}

/// The game loop. Runs until game over, the tick limit or a shutdown command.
pub fn run(
    engine: &mut SimulationEngine,
    clock: &mut dyn FrameClock,
    presenter: &mut dyn Presenter,
    commands: &mpsc::Receiver<HostCommand>,
    options: HostOptions,
) -> RunSummary {
    let autopilot = Autopilot;
    let mut fixed_step = FixedStepLoop::default();
    fixed_step.start();

    let limit_reached = |engine: &SimulationEngine| {
        options
            .max_ticks
            .is_some_and(|max| engine.time().tick >= max)
    };

    while engine.phase() != GamePhase::GameOver && !limit_reached(engine) {
        // 1. Drain all pending commands
        if drain_commands(engine, commands) {
            info!(tick = engine.time().tick, "shutdown requested");
            break;
        }
        sync_loop_state(&mut fixed_step, engine.phase());

        // 2. Advance whole fixed steps
        let elapsed = clock.next_frame();
        fixed_step.advance(elapsed, |dt| {
            if limit_reached(engine) {
                return;
            }
            let intent = autopilot.steer(engine.context());
            engine.step(dt, intent);
        });

        // 3. Hand the frame's snapshot to the presenter
        let snapshot = engine.snapshot();
        presenter.present(&snapshot);
    }

    let summary = RunSummary {
        ticks: engine.time().tick,
        elapsed_secs: engine.time().elapsed_secs,
        phase: engine.phase(),
        level: engine.context().player.level,
        stats: engine.stats().clone(),
    };
    info!(
        ticks = summary.ticks,
        level = summary.level,
        stats = %serde_json::to_string(&summary.stats).unwrap_or_default(),
        "host finished"
    );
    summary
}

/// Forward pending commands and apply them. Returns true on shutdown.
/// A disconnected sender only means no more commands will come.
fn drain_commands(engine: &mut SimulationEngine, commands: &mpsc::Receiver<HostCommand>) -> bool {
    let mut shutdown = false;
    while let Ok(command) = commands.try_recv() {
        match command {
            HostCommand::Player(cmd) => engine.queue_command(cmd),
            HostCommand::Shutdown => shutdown = true,
        }
    }
    engine.process_commands();
    shutdown
}

fn sync_loop_state(fixed_step: &mut FixedStepLoop, phase: GamePhase) {
    match (phase, fixed_step.state()) {
        (GamePhase::Paused, LoopState::Running) => fixed_step.pause(),
        (GamePhase::Running, LoopState::Paused) => fixed_step.resume(),
        _ => {}
    }
}
