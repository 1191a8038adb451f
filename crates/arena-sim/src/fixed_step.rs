//! Fixed-timestep accumulator, decoupled from the render frame rate.
//!
//! The host calls [`FixedStepLoop::advance`] once per frame with the real
//! elapsed time. The loop banks it and runs zero or more fixed steps. The
//! bank is clamped to `max_catch_up` steps so a long stall cannot trigger a
//! runaway burst of catch-up work.

use std::time::Duration;

use tracing::debug;

use arena_core::constants::{MAX_CATCH_UP_STEPS, TICK_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub struct FixedStepLoop {
    step: Duration,
    max_catch_up: u32,
    accumulator: Duration,
    state: LoopState,
}

impl Default for FixedStepLoop {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(1.0 / f64::from(TICK_RATE)), MAX_CATCH_UP_STEPS)
    }
}

impl FixedStepLoop {
    /// A stopped loop. Zero values fall back to one tick and one step.
    pub fn new(step: Duration, max_catch_up: u32) -> Self {
        let step = if step.is_zero() {
            Duration::from_secs_f64(1.0 / f64::from(TICK_RATE))
        } else {
            step
        };
        Self {
            step,
            max_catch_up: max_catch_up.max(1),
            accumulator: Duration::ZERO,
            state: LoopState::Stopped,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn start(&mut self) {
        if self.state == LoopState::Stopped {
            self.accumulator = Duration::ZERO;
            self.state = LoopState::Running;
        }
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
        self.accumulator = Duration::ZERO;
    }

    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == LoopState::Paused {
            self.state = LoopState::Running;
        }
    }

    /// Bank `elapsed` and run every whole step it covers, calling `on_step`
    /// with the fixed delta in seconds. Returns the number of steps run.
    ///
    /// Time passed while paused or stopped is discarded, not replayed.
    pub fn advance(&mut self, elapsed: Duration, mut on_step: impl FnMut(f32)) -> u32 {
        if self.state != LoopState::Running {
            return 0;
        }

        let cap = self.step * self.max_catch_up;
        let banked = self.accumulator + elapsed;
        if banked > cap {
            debug!(dropped_ms = (banked - cap).as_millis() as u64, "catch-up backlog dropped");
        }
        self.accumulator = banked.min(cap);

        let dt = self.step.as_secs_f32();
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            on_step(dt);
            steps += 1;
        }
        steps
    }

    /// Fraction of a step left in the bank, for render interpolation.
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f64() / self.step.as_secs_f64()) as f32
    }
}
