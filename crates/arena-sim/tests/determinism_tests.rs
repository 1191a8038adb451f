use std::time::Duration;

use arena_sim::core::commands::MovementIntent;
use arena_sim::core::config::SessionSettings;
use arena_sim::core::config::Tuning;
use arena_sim::core::enums::AbilityKind;
use arena_sim::{FixedStepLoop, SimConfig, SimulationEngine};

/// Scripted input: circles through the four directions, idling every fifth
/// second so drops and enemies get a chance to catch up.
fn intent_at(step: u64) -> MovementIntent {
    let phase = (step / 30) % 5;
    MovementIntent {
        forward: phase == 0 || phase == 1,
        right: phase == 1 || phase == 2,
        back: phase == 3,
        left: phase == 3,
    }
}

fn config(seed: u64) -> SimConfig {
    let settings = SessionSettings {
        seed,
        ..SessionSettings::default()
    };
    SimConfig::from_settings(settings, Tuning::default())
}

fn armed_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config(seed));
    for kind in [AbilityKind::Trail, AbilityKind::Seekers, AbilityKind::Shockwave] {
        engine.grant_ability(kind).unwrap();
    }
    engine
}

fn run_scenario(seed: u64, ticks: u64) -> String {
    let mut engine = armed_engine(seed);
    let mut last_snapshot = engine.tick(intent_at(0));
    for step in 1..ticks {
        last_snapshot = engine.tick(intent_at(step));
    }
    serde_json::to_string(&last_snapshot).unwrap()
}

fn position_trace(seed: u64, ticks: u64) -> Vec<[f32; 3]> {
    let mut engine = armed_engine(seed);
    let mut trace = Vec::new();
    for step in 0..ticks {
        let snap = engine.tick(intent_at(step));
        trace.push(snap.player.position.to_array());
        for enemy in &snap.enemies {
            trace.push(enemy.position.to_array());
        }
    }
    trace
}

#[test]
fn identical_inputs_produce_identical_snapshots() {
    let run1 = run_scenario(7, 120);
    let run2 = run_scenario(7, 120);

    assert_eq!(
        run1, run2,
        "Two identical runs must produce byte-identical snapshots"
    );
}

#[test]
fn determinism_over_longer_run() {
    let run1 = run_scenario(7, 600);
    let run2 = run_scenario(7, 600);

    assert_eq!(run1, run2, "Determinism must hold over 600 ticks (10 seconds)");
}

#[test]
fn identical_inputs_produce_identical_position_sequences() {
    assert_eq!(position_trace(99, 240), position_trace(99, 240));
}

#[test]
fn different_seeds_diverge() {
    let run_a = run_scenario(1, 60);
    let run_b = run_scenario(2, 60);

    assert_ne!(run_a, run_b, "Spawn placement is seeded, so runs must differ");
}

#[test]
fn different_tick_counts_diverge() {
    let run_120 = run_scenario(7, 120);
    let run_121 = run_scenario(7, 121);

    assert_ne!(run_120, run_121);
}

#[test]
fn fixed_step_loop_matches_direct_stepping() {
    // Irregular frame times, all under the catch-up cap.
    let frames = [10u64, 21, 7, 33, 16, 2, 45];

    let mut looped = armed_engine(5);
    let mut lp = FixedStepLoop::default();
    lp.start();
    let dt = lp.step().as_secs_f32();

    let mut steps_run: u64 = 0;
    for round in 0..40 {
        let elapsed = Duration::from_millis(frames[round % frames.len()]);
        lp.advance(elapsed, |dt| {
            looped.step(dt, intent_at(steps_run));
            steps_run += 1;
        });
    }
    assert!(steps_run > 0);

    let mut direct = armed_engine(5);
    for step in 0..steps_run {
        direct.step(dt, intent_at(step));
    }

    assert_eq!(looped.time().tick, steps_run);
    let a = serde_json::to_string(&looped.snapshot()).unwrap();
    let b = serde_json::to_string(&direct.snapshot()).unwrap();
    assert_eq!(a, b, "Frame pacing must not leak into the simulation");
}
