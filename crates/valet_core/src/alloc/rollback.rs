//! Undo log. Every successful allocation pushes one entry; rolling back pops
//! the most recent entries and resets what they touched. The log is never
//! pruned when a request later completes or cancels, so an undone entry can
//! reach back past a terminal state.

use crate::lifecycle::RequestState;
use crate::types::{RequestId, SlotId, ZoneId};

/// One recorded allocation, with the state the request held before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollbackEntry {
    pub request: RequestId,
    pub slot: SlotId,
    pub zone: ZoneId,
    pub prior_state: RequestState,
}

/// Last-in-first-out log of allocation actions.
#[derive(Debug, Clone, Default)]
pub struct RollbackManager {
    entries: Vec<RollbackEntry>,
}

impl RollbackManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: RollbackEntry) {
        self.entries.push(entry);
    }

    /// Take the most recent entry.
    pub fn pop(&mut self) -> Option<RollbackEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counters over the undo log.
#[derive(Debug, Default)]
pub struct RollbackMetrics {
    recorded_total: u64,
    undone_total: u64,
}

impl RollbackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded_total(&self) -> u64 {
        self.recorded_total
    }

    pub fn undone_total(&self) -> u64 {
        self.undone_total
    }

    pub fn record_recorded(&mut self) {
        self.recorded_total += 1;
    }

    pub fn record_undone(&mut self) {
        self.undone_total += 1;
    }
}
