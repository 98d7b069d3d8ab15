//! Fixed-capacity bullet pool recycled oldest-first.

use gemfire_core::BulletHandle;
use glam::Vec3;

/// Physics state captured for one live bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BulletState {
    /// Muzzle position the bullet was fired from.
    pub position: Vec3,
    /// Impulse applied to the bullet body on spawn.
    pub impulse: Vec3,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    generation: u32,
    state: BulletState,
}

/// Ring of reusable bullet slots capped at a fixed capacity.
///
/// Below capacity, `spawn` appends a fresh slot; at capacity it evicts the
/// oldest slot FIFO, overwrites its state completely, and bumps the slot's
/// generation so stale handles can be told apart from the replacement.
/// Eviction is O(1): the head index advances instead of splicing the list.
#[derive(Clone, Debug)]
pub(crate) struct BulletPool {
    capacity: usize,
    slots: Vec<Slot>,
    head: usize,
}

impl BulletPool {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            head: 0,
        }
    }

    /// Allocates a slot for a new bullet, evicting the oldest when full.
    ///
    /// Returns the handle of the new bullet and, when a slot was recycled,
    /// the retired handle of the bullet it replaced.
    pub(crate) fn spawn(
        &mut self,
        position: Vec3,
        impulse: Vec3,
    ) -> (BulletHandle, Option<BulletHandle>) {
        let state = BulletState { position, impulse };

        if self.slots.len() < self.capacity {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                state,
            });
            return (BulletHandle::new(index, 0), None);
        }

        let index = self.head;
        let slot = &mut self.slots[index];
        let retired = BulletHandle::new(index as u32, slot.generation);
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = state;
        let handle = BulletHandle::new(index as u32, slot.generation);
        self.head = (self.head + 1) % self.capacity;
        (handle, Some(retired))
    }

    /// State of the bullet named by the handle, if it is still current.
    pub(crate) fn get(&self, handle: BulletHandle) -> Option<BulletState> {
        self.slots
            .get(handle.slot() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .map(|slot| slot.state)
    }

    /// Live bullets in insertion order, oldest first.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (BulletHandle, BulletState)> + '_ {
        let len = self.slots.len();
        (0..len).map(move |offset| {
            let index = (self.head + offset) % len;
            let slot = &self.slots[index];
            (
                BulletHandle::new(index as u32, slot.generation),
                slot.state,
            )
        })
    }
}
