//! Fixed-capacity slot pools.
//!
//! Enemies, projectiles and particles live in pools sized once at startup and
//! reused across frames. A slot is handed out from a LIFO free stack and
//! addressed by a generational [`SlotHandle`], so releasing and reusing a slot
//! invalidates every handle to its previous occupant.

pub mod enemies;
pub mod particles;
pub mod projectiles;

pub use enemies::{Admission, Enemy, EnemyPool};
pub use particles::{Particle, ParticleMotion, ParticlePool};
pub use projectiles::{Projectile, ProjectilePool};

use arena_core::types::SlotHandle;

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    /// Acquisition order, for oldest-first eviction.
    sequence: u64,
    value: Option<T>,
}

/// Fixed-capacity pool with a LIFO free stack.
#[derive(Debug, Clone)]
pub struct SlotPool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
    next_sequence: u64,
}

impl<T> SlotPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                sequence: 0,
                value: None,
            })
            .collect();
        // Reversed so the first acquire pops slot 0.
        let free = (0..capacity as u32).rev().collect();
        Self {
            slots,
            free,
            len: 0,
            next_sequence: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Occupy the next free slot, or `None` if the pool is exhausted.
    pub fn acquire(&mut self, value: T) -> Option<SlotHandle> {
        let index = self.free.pop()?;
        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.value.is_none(), "free stack handed out occupied slot {index}");
        slot.value = Some(value);
        slot.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.len += 1;
        Some(SlotHandle::new(index, slot.generation))
    }

    /// Vacate a slot. Stale or unknown handles are ignored and return `None`.
    pub fn release(&mut self, handle: SlotHandle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(value)
    }

    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// The occupied slot acquired earliest.
    pub fn oldest(&self) -> Option<SlotHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.value.is_some())
            .min_by_key(|(_, slot)| slot.sequence)
            .map(|(index, slot)| SlotHandle::new(index as u32, slot.generation))
    }

    /// Occupied slots in ascending slot order. The order is stable until the next acquire/release.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (SlotHandle::new(index as u32, slot.generation), value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotHandle, &mut T)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(|value| (SlotHandle::new(index as u32, generation), value))
        })
    }

    /// Release every slot for which `keep` returns false. Returns how many were released.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) -> usize {
        let mut released = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(value) = slot.value.as_mut() else {
                continue;
            };
            if !keep(value) {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
                released += 1;
            }
        }
        self.len -= released;
        released
    }

    /// Release every slot.
    pub fn clear(&mut self) {
        self.retain(|_| false);
    }
}
