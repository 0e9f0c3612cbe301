//! Ordered slot directory. Maps a slot id to the slot's address inside the
//! zone arenas; the directory never owns slot storage. Lookups, inserts,
//! and removals are all logarithmic in the number of slots.

use std::collections::BTreeMap;

use crate::types::SlotId;

/// Address of a slot: zone position in the lot, slot position in the zone.
/// Positions are stable because zones and slots are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAddr {
    pub zone: usize,
    pub pos: usize,
}

/// Ordered id-to-address directory over the whole lot.
#[derive(Debug, Clone, Default)]
pub struct SlotIndex {
    entries: BTreeMap<SlotId, SlotAddr>,
}

impl SlotIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the address for `id`, overwriting any previous entry.
    pub fn insert(&mut self, id: SlotId, addr: SlotAddr) {
        self.entries.insert(id, addr);
    }

    pub fn find(&self, id: SlotId) -> Option<SlotAddr> {
        self.entries.get(&id).copied()
    }

    /// Drop the entry for `id`, returning its address when one was present.
    pub fn remove(&mut self, id: SlotId) -> Option<SlotAddr> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
