//! Enemy pool: the bounded, recycled enemy population.

use glam::Vec3;
use tracing::debug;

use arena_core::types::SlotHandle;

use super::SlotPool;

/// One pooled enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub position: Vec3,
    /// Seek speed (m/s).
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
}

/// Result of [`EnemyPool::add_or_evict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub handle: SlotHandle,
    /// The enemy recycled to make room, if the pool was full.
    pub evicted: Option<SlotHandle>,
}

/// Fixed-capacity enemy manager.
#[derive(Debug, Clone)]
pub struct EnemyPool {
    slots: SlotPool<Enemy>,
    speed: f32,
    health: f32,
}

impl EnemyPool {
    pub fn new(capacity: usize, speed: f32, health: f32) -> Self {
        Self {
            slots: SlotPool::with_capacity(capacity),
            speed,
            health,
        }
    }

    /// Activate an enemy at `position`, or `None` when every slot is live.
    pub fn add_entity(&mut self, position: Vec3) -> Option<SlotHandle> {
        self.slots.acquire(Enemy {
            position,
            speed: self.speed,
            health: self.health,
            max_health: self.health,
        })
    }

    /// Activate an enemy, recycling the oldest live one if the pool is full.
    ///
    /// Only a zero-capacity pool returns `None`.
    pub fn add_or_evict(&mut self, position: Vec3) -> Option<Admission> {
        if let Some(handle) = self.add_entity(position) {
            return Some(Admission {
                handle,
                evicted: None,
            });
        }

        let oldest = self.oldest_entity()?;
        self.remove_entity(oldest);
        debug!(slot = oldest.index, "enemy pool full, evicted oldest");
        let handle = self.add_entity(position)?;
        Some(Admission {
            handle,
            evicted: Some(oldest),
        })
    }

    /// Deactivate an enemy. Returns false for stale handles.
    pub fn remove_entity(&mut self, handle: SlotHandle) -> bool {
        self.slots.release(handle).is_some()
    }

    /// Seek every live enemy toward `target` by `speed * dt`, stopping on it.
    pub fn update(&mut self, dt: f32, target: Vec3) {
        for (_, enemy) in self.slots.iter_mut() {
            let to_target = target - enemy.position;
            let distance = to_target.length();
            let step = enemy.speed * dt;
            if distance <= step {
                enemy.position = target;
            } else {
                enemy.position += to_target / distance * step;
            }
        }
    }

    /// The live enemy admitted earliest.
    pub fn oldest_entity(&self) -> Option<SlotHandle> {
        self.slots.oldest()
    }

    pub fn get(&self, handle: SlotHandle) -> Option<&Enemy> {
        self.slots.get(handle)
    }

    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut Enemy> {
        self.slots.get_mut(handle)
    }

    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.slots.contains(handle)
    }

    /// Live enemies in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &Enemy)> + '_ {
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

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_pool_refuses_plain_add() {
        let mut pool = EnemyPool::new(2, 1.0, 3.0);
        assert!(pool.add_entity(Vec3::ZERO).is_some());
        assert!(pool.add_entity(Vec3::ZERO).is_some());
        assert!(pool.add_entity(Vec3::ZERO).is_none());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn add_or_evict_recycles_oldest_slot() {
        let mut pool = EnemyPool::new(100, 1.0, 3.0);
        let handles: Vec<_> = (0..100)
            .map(|i| pool.add_entity(Vec3::new(i as f32, 0.0, 0.0)).unwrap())
            .collect();

        let admission = pool.add_or_evict(Vec3::new(-5.0, 0.0, 0.0)).unwrap();
        assert_eq!(admission.evicted, Some(handles[0]));
        assert_eq!(admission.handle.index, handles[0].index);
        assert!(!pool.contains(handles[0]));
        assert_eq!(pool.get(admission.handle).unwrap().position.x, -5.0);
        assert_eq!(pool.len(), 100);
        assert_eq!(pool.oldest_entity(), Some(handles[1]));
    }

    #[test]
    fn zero_capacity_pool_admits_nothing() {
        let mut pool = EnemyPool::new(0, 1.0, 3.0);
        assert!(pool.add_or_evict(Vec3::ZERO).is_none());
    }

    #[test]
    fn seek_never_overshoots() {
        let mut pool = EnemyPool::new(2, 10.0, 3.0);
        let near = pool.add_entity(Vec3::new(0.5, 0.0, 0.0)).unwrap();
        let far = pool.add_entity(Vec3::new(0.0, 0.0, 20.0)).unwrap();

        pool.update(0.1, Vec3::ZERO);
        assert_eq!(pool.get(near).unwrap().position, Vec3::ZERO);
        let far_pos = pool.get(far).unwrap().position;
        assert!((far_pos.z - 19.0).abs() < 1e-5);
    }

    #[test]
    fn removed_slot_is_hidden_from_iteration() {
        let mut pool = EnemyPool::new(3, 1.0, 3.0);
        let a = pool.add_entity(Vec3::ZERO).unwrap();
        let b = pool.add_entity(Vec3::ONE).unwrap();
        assert!(pool.remove_entity(a));
        assert!(!pool.remove_entity(a));
        let live: Vec<_> = pool.iter().map(|(h, _)| h).collect();
        assert_eq!(live, vec![b]);
    }
}
