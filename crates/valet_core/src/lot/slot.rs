//! Slot records. A slot moves Free -> Allocated -> Occupied -> Free over one
//! request cycle; the Occupied leg is skipped when a reservation is cancelled
//! or rolled back.

use crate::types::{SlotId, Tick, ZoneId};

/// Physical state of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    Free,
    Allocated,
    Occupied,
}

/// One parking slot inside a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSlot {
    pub id: SlotId,
    pub zone: ZoneId,
    status: SlotStatus,
    occupied_since: Option<Tick>,
}

impl ParkingSlot {
    pub fn new(id: SlotId, zone: ZoneId) -> Self {
        Self {
            id,
            zone,
            status: SlotStatus::Free,
            occupied_since: None,
        }
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn is_free(&self) -> bool {
        self.status == SlotStatus::Free
    }

    /// Tick at which the current occupancy began, while one is underway.
    pub fn occupied_since(&self) -> Option<Tick> {
        self.occupied_since
    }

    /// Reserve the slot. Callers pick free slots; the move itself is
    /// unconditional.
    pub fn allocate(&mut self) {
        self.status = SlotStatus::Allocated;
    }

    /// Mark the slot physically taken as of `tick`.
    pub fn occupy(&mut self, tick: Tick) {
        self.status = SlotStatus::Occupied;
        self.occupied_since = Some(tick);
    }

    /// Return the slot to the free pool, clearing any occupancy stamp.
    pub fn release(&mut self) {
        self.status = SlotStatus::Free;
        self.occupied_since = None;
    }
}
