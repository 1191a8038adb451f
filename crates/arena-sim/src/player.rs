//! Player data model.
//!
//! Stored directly in the `SimulationContext`, NOT as an ECS entity. There is
//! exactly one player per run; death flips the run to game over instead of
//! removing it.

use glam::Vec3;

use arena_core::config::Tuning;
use arena_core::profiles::ClassProfile;
use arena_core::types::{heading_of, Aabb};

/// Outcome of [`Player::apply_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Health dropped but stayed above zero.
    Wounded,
    /// This hit took health to zero.
    Killed,
    /// Health was already zero; nothing changed.
    AlreadyDead,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    /// Facing about +Y (radians).
    pub rotation: f32,
    pub health: f32,
    pub max_health: f32,
    /// Movement speed (m/s).
    pub speed: f32,

    // --- Progression ---
    pub experience: u32,
    pub experience_threshold: u32,
    pub level: u32,

    /// Radius inside which drops drift toward the player.
    pub influence_radius: f32,
    /// Chance in [0, 1] to ignore a hit.
    pub evasion: f64,
    /// False until the host reports the visual asset loaded.
    pub visual_ready: bool,
}

impl Player {
    pub fn new(profile: &ClassProfile, tuning: &Tuning) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: 0.0,
            health: profile.max_health,
            max_health: profile.max_health,
            speed: profile.speed,
            experience: 0,
            experience_threshold: tuning.base_experience_threshold.max(1),
            level: 1,
            influence_radius: profile.influence_radius,
            evasion: profile.evasion.clamp(0.0, 1.0),
            visual_ready: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Subtract `amount`, clamping at zero. Reports `Killed` only on the hit
    /// that crosses zero, so a run can end at most once.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::AlreadyDead;
        }
        self.health = (self.health - amount.max(0.0)).max(0.0);
        if self.is_alive() {
            DamageOutcome::Wounded
        } else {
            DamageOutcome::Killed
        }
    }

    /// Add experience and return every level reached, in order.
    pub fn gain_experience(&mut self, amount: u32, growth: f32) -> Vec<u32> {
        let mut reached = Vec::new();
        self.experience += amount;
        while self.experience >= self.experience_threshold {
            self.experience -= self.experience_threshold;
            self.level += 1;
            let grown = (self.experience_threshold as f32 * growth).ceil() as u32;
            self.experience_threshold = grown.max(self.experience_threshold + 1);
            reached.push(self.level);
        }
        reached
    }

    /// Walk along `direction` (already normalized) and stay inside `bounds`.
    pub fn walk(&mut self, direction: Vec3, dt: f32, bounds: &Aabb) {
        if direction == Vec3::ZERO {
            return;
        }
        self.position = bounds.clamp(self.position + direction * self.speed * dt);
        self.rotation = heading_of(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::enums::PlayerClass;
    use arena_core::profiles::class_profile;

    fn runner() -> Player {
        Player::new(&class_profile(PlayerClass::Runner), &Tuning::default())
    }

    #[test]
    fn damage_clamps_and_kills_once() {
        let mut player = runner();
        assert_eq!(player.apply_damage(2.0), DamageOutcome::Wounded);
        assert_eq!(player.apply_damage(100.0), DamageOutcome::Killed);
        assert_eq!(player.health, 0.0);
        assert_eq!(player.apply_damage(1.0), DamageOutcome::AlreadyDead);
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn experience_rolls_over_into_levels() {
        let mut player = runner();
        player.experience_threshold = 2;
        let levels = player.gain_experience(2, 1.5);
        assert_eq!(levels, vec![2]);
        assert_eq!(player.experience, 0);
        assert_eq!(player.experience_threshold, 3);

        let levels = player.gain_experience(10, 1.5);
        // 10 -> level 3 (rest 7, threshold 5) -> level 4 (rest 2, threshold 8)
        assert_eq!(levels, vec![3, 4]);
        assert_eq!(player.experience, 2);
    }

    #[test]
    fn walk_stays_in_bounds_and_faces_motion() {
        let mut player = runner();
        let bounds = Aabb::around(Vec3::ZERO, 1.0);
        player.walk(Vec3::X, 10.0, &bounds);
        assert_eq!(player.position.x, 1.0);
        assert!((player.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        player.walk(Vec3::ZERO, 1.0, &bounds);
        assert!((player.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
