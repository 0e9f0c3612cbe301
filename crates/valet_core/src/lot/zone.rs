//! Zones. Each zone owns an ordered arena of slots, and each zone's slot ids
//! live in its own 1000-wide block so ids stay unique across the lot.

use std::error::Error;
use std::fmt;
use std::ops::Range;

use crate::lot::slot::ParkingSlot;
use crate::types::{SlotId, ZoneId};

/// Width of the slot-id block reserved for each zone.
pub const SLOT_ID_STRIDE: u32 = 1000;

/// Raised when a batch of slots would not fit the zone's id block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneCapacityError {
    pub zone: ZoneId,
    pub in_use: u32,
    pub requested: u32,
}

impl fmt::Display for ZoneCapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "zone {} id block full: {} slots in use, {} more requested",
            self.zone, self.in_use, self.requested
        )
    }
}

impl Error for ZoneCapacityError {}

/// One zone of the lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    slots: Vec<ParkingSlot>,
}

impl Zone {
    pub fn new(id: ZoneId) -> Self {
        Self {
            id,
            slots: Vec::new(),
        }
    }

    /// Append `count` slots numbered `id * 1000 + offset` and return the id
    /// range of the new batch. Refuses batches that would overflow the
    /// zone's id block, leaving the zone untouched.
    pub fn add_slots(&mut self, count: u32) -> Result<Range<SlotId>, ZoneCapacityError> {
        let in_use = self.slots.len() as u32;
        if count > SLOT_ID_STRIDE - in_use {
            return Err(ZoneCapacityError {
                zone: self.id,
                in_use,
                requested: count,
            });
        }
        let first = self.id * SLOT_ID_STRIDE + in_use;
        for offset in 0..count {
            self.slots.push(ParkingSlot::new(first + offset, self.id));
        }
        Ok(first..first + count)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[ParkingSlot] {
        &self.slots
    }

    pub fn slot_at_mut(&mut self, pos: usize) -> Option<&mut ParkingSlot> {
        self.slots.get_mut(pos)
    }

    pub fn slot_mut_by_id(&mut self, id: SlotId) -> Option<&mut ParkingSlot> {
        self.slots.iter_mut().find(|s| s.id == id)
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_free()).count()
    }

    /// Ids of the currently free slots, in id order.
    pub fn free_slot_ids(&self) -> Vec<SlotId> {
        self.slots
            .iter()
            .filter(|s| s.is_free())
            .map(|s| s.id)
            .collect()
    }
}
