//! Visual-only particles.
//!
//! A full pool recycles its oldest particle instead of refusing the spawn.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::enums::ParticleKind;
use arena_core::types::planar_direction;

use super::SlotPool;

/// Per-tick motion rule for a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleMotion {
    Linear,
    /// Constant downward acceleration (m/s²).
    Gravity(f32),
    /// Exponential velocity decay rate (1/s).
    Damped(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub life: f32,
    pub max_life: f32,
    pub kind: ParticleKind,
    pub motion: ParticleMotion,
}

impl Particle {
    pub fn life_fraction(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn integrate(&mut self, dt: f32) {
        match self.motion {
            ParticleMotion::Linear => {}
            ParticleMotion::Gravity(g) => self.velocity.y -= g * dt,
            ParticleMotion::Damped(rate) => self.velocity *= (-rate * dt).exp(),
        }
        self.position += self.velocity * dt;
        self.life -= dt;
    }
}

#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: SlotPool<Particle>,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: SlotPool::with_capacity(capacity),
        }
    }

    /// Spawn a particle, evicting the oldest one when full.
    pub fn spawn(&mut self, particle: Particle) {
        if self.slots.is_full() {
            match self.slots.oldest() {
                Some(oldest) => {
                    self.slots.release(oldest);
                }
                None => return,
            }
        }
        self.slots.acquire(particle);
    }

    /// Spawn `count` particles flying outward on the XZ plane with a small upward kick.
    #[allow(clippy::too_many_arguments)]
    pub fn burst(
        &mut self,
        rng: &mut ChaCha8Rng,
        center: Vec3,
        count: usize,
        speed: f32,
        lifetime: f32,
        kind: ParticleKind,
        motion: ParticleMotion,
    ) {
        for _ in 0..count {
            let heading = rng.gen_range(0.0..std::f32::consts::TAU);
            let scale = rng.gen_range(0.5..=1.0);
            let velocity = planar_direction(heading) * speed * scale + Vec3::Y * speed * 0.5;
            self.spawn(Particle {
                position: center,
                velocity,
                life: lifetime * scale,
                max_life: lifetime * scale,
                kind,
                motion,
            });
        }
    }

    /// Integrate every particle and release the expired ones.
    pub fn update(&mut self, dt: f32) -> usize {
        self.slots.retain(|p| {
            p.integrate(dt);
            p.life > 0.0
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.slots.iter().map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}
