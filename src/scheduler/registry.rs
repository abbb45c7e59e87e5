//! Fixed-size registry of idle workers.

use std::fmt;

use crate::models::{same_worker, WorkerHandle};

/// Result of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Stored in the given slot.
    Registered(usize),
    /// The handle already occupies the given slot.
    AlreadyWaiting(usize),
    /// Every slot is taken; the handle was dropped.
    Full,
}

/// Slot array of idle worker handles.
///
/// Starts with every slot empty. Registration takes the first free slot,
/// deregistration clears a slot without moving the others, and a handle
/// never occupies two slots.
pub struct IdleRegistry {
    slots: Vec<Option<WorkerHandle>>,
}

impl IdleRegistry {
    /// Creates a registry with `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Places a handle in the first free slot.
    pub fn register(&mut self, worker: WorkerHandle) -> Registration {
        if let Some(slot) = self.slot_of(&worker) {
            return Registration::AlreadyWaiting(slot);
        }
        match self.slots.iter().position(Option::is_none) {
            Some(slot) => {
                self.slots[slot] = Some(worker);
                Registration::Registered(slot)
            }
            None => Registration::Full,
        }
    }

    /// Clears the slot holding this handle; returns the slot index.
    pub fn deregister(&mut self, worker: &WorkerHandle) -> Option<usize> {
        let slot = self.slot_of(worker)?;
        self.slots[slot] = None;
        Some(slot)
    }

    /// Slot index of a handle, by identity.
    pub fn slot_of(&self, worker: &WorkerHandle) -> Option<usize> {
        self.slots
            .iter()
            .position(|held| held.as_ref().is_some_and(|h| same_worker(h, worker)))
    }

    pub fn contains(&self, worker: &WorkerHandle) -> bool {
        self.slot_of(worker).is_some()
    }

    /// Occupied handles in slot order.
    pub fn waiting(&self) -> Vec<WorkerHandle> {
        self.slots.iter().flatten().cloned().collect()
    }

    /// Raw slot view; `None` marks a free slot.
    pub fn slots(&self) -> &[Option<WorkerHandle>] {
        &self.slots
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

impl fmt::Debug for IdleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied: Vec<bool> = self.slots.iter().map(Option::is_some).collect();
        f.debug_struct("IdleRegistry")
            .field("occupied", &occupied)
            .finish()
    }
}
