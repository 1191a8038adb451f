//! Snapshot consumers.
//!
//! The headless host has no renderer, so the default presenter turns events
//! and periodic HUD summaries into log lines.

use tracing::{debug, info};

use arena_core::constants::TICK_RATE;
use arena_core::events::GameEvent;
use arena_core::state::GameStateSnapshot;

/// Receives one snapshot per host frame.
pub trait Presenter {
    fn present(&mut self, snapshot: &GameStateSnapshot);
}

/// Logs every event and a HUD line every `hud_every` ticks.
#[derive(Debug, Clone)]
pub struct LogPresenter {
    hud_every: u64,
    last_hud_tick: Option<u64>,
}

impl Default for LogPresenter {
    fn default() -> Self {
        Self::new(u64::from(TICK_RATE))
    }
}

impl LogPresenter {
    pub fn new(hud_every: u64) -> Self {
        Self {
            hud_every: hud_every.max(1),
            last_hud_tick: None,
        }
    }

    fn hud_due(&self, tick: u64) -> bool {
        match self.last_hud_tick {
            None => true,
            Some(last) => tick >= last + self.hud_every,
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        for event in &snapshot.events {
            log_event(event);
        }

        let tick = snapshot.time.tick;
        if self.hud_due(tick) {
            self.last_hud_tick = Some(tick);
            let hud = &snapshot.hud;
            info!(
                tick,
                secs = hud.elapsed_secs,
                health = hud.health,
                level = hud.level,
                xp = hud.experience,
                kills = hud.kills,
                enemies = snapshot.enemies.len(),
                abilities = ?hud.abilities,
                "hud"
            );
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::AbilityAcquired { kind, tick } => {
            info!(ability = kind.name(), tick, "ability acquired")
        }
        GameEvent::AbilityLost { kind, tick } => info!(ability = kind.name(), tick, "ability lost"),
        GameEvent::LevelUp { level, tick, .. } => info!(level, tick, "level up"),
        GameEvent::PlayerHit {
            damage,
            remaining_health,
            dodged,
            tick,
        } => info!(damage, remaining_health, dodged, tick, "player hit"),
        GameEvent::DropCollected {
            grant,
            granted,
            tick,
        } => info!(ability = grant.name(), granted, tick, "drop collected"),
        GameEvent::GameOver {
            tick,
            elapsed_secs,
            kills,
            level,
        } => info!(tick, elapsed_secs, kills, level, "run ended"),
        GameEvent::ProjectileHit { tick, .. } => debug!(tick, "projectile hit"),
        GameEvent::EnemyKilled { cause, tick, .. } => debug!(?cause, tick, "enemy killed"),
    }
}
