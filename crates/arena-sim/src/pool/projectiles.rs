//! Projectile pool.

use glam::Vec3;

use arena_core::types::{Aabb, SlotHandle};

use super::SlotPool;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds until the projectile expires.
    pub lifetime: f32,
}

/// Bullets pulled on fire and returned on expiry or hit.
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: SlotPool<Projectile>,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: SlotPool::with_capacity(capacity),
        }
    }

    /// Pull a projectile from the pool. `None` when every projectile is in flight.
    pub fn fire(&mut self, position: Vec3, velocity: Vec3, lifetime: f32) -> Option<SlotHandle> {
        self.slots.acquire(Projectile {
            position,
            velocity,
            lifetime,
        })
    }

    /// Return a projectile to the pool. Returns false for stale handles.
    pub fn release(&mut self, handle: SlotHandle) -> bool {
        self.slots.release(handle).is_some()
    }

    /// Integrate velocity and return expired or out-of-bounds projectiles.
    /// Returns how many were released.
    pub fn update(&mut self, dt: f32, bounds: &Aabb) -> usize {
        self.slots.retain(|p| {
            p.position += p.velocity * dt;
            p.lifetime -= dt;
            p.lifetime > 0.0 && bounds.contains(p.position)
        })
    }

    pub fn get(&self, handle: SlotHandle) -> Option<&Projectile> {
        self.slots.get(handle)
    }

    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.slots.contains(handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &Projectile)> + '_ {
        self.slots.iter()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectiles_expire_after_lifetime() {
        let bounds = Aabb::around(Vec3::ZERO, 100.0);
        let mut pool = ProjectilePool::new(4);
        let h = pool.fire(Vec3::ZERO, Vec3::X * 10.0, 0.25).unwrap();

        assert_eq!(pool.update(0.1, &bounds), 0);
        assert!((pool.get(h).unwrap().position.x - 1.0).abs() < 1e-5);
        pool.update(0.1, &bounds);
        assert_eq!(pool.update(0.1, &bounds), 1);
        assert!(pool.is_empty());
        assert!(!pool.contains(h));
    }

    #[test]
    fn projectiles_leaving_bounds_are_returned() {
        let bounds = Aabb::around(Vec3::ZERO, 1.0);
        let mut pool = ProjectilePool::new(1);
        pool.fire(Vec3::new(0.9, 0.0, 0.0), Vec3::X * 10.0, 5.0).unwrap();
        assert_eq!(pool.update(0.1, &bounds), 1);
        assert!(pool.fire(Vec3::ZERO, Vec3::X, 1.0).is_some());
    }
}
