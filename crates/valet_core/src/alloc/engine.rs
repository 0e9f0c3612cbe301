//! Slot selection. Every free slot in the lot is a candidate; a candidate in
//! the requested zone costs nothing and any other zone costs the fixed
//! cross-zone penalty. The cheapest candidate wins, lowest slot id breaking
//! ties.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::lot::Zone;
use crate::types::{SlotId, ZoneId};

/// Penalty charged when a request is served outside its requested zone.
pub const CROSS_ZONE_PENALTY: f64 = 5.0;

/// One free slot under consideration. Derived ordering is
/// (cross_zone, slot id), which with a single penalty tier is exactly
/// ascending (penalty, slot id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    cross_zone: bool,
    slot: SlotId,
    zone: ZoneId,
}

/// How an allocation attempt ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllocationOutcome {
    /// A slot was reserved for the request.
    Assigned {
        slot: SlotId,
        zone: ZoneId,
        penalty: f64,
    },
    /// No free slot anywhere in the lot; nothing was touched.
    Exhausted,
}

/// Counters over allocation attempts.
#[derive(Debug, Default)]
pub struct AllocationMetrics {
    assigned_total: u64,
    cross_zone_total: u64,
    exhausted_total: u64,
}

impl AllocationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assigned_total(&self) -> u64 {
        self.assigned_total
    }

    pub fn cross_zone_total(&self) -> u64 {
        self.cross_zone_total
    }

    pub fn exhausted_total(&self) -> u64 {
        self.exhausted_total
    }

    fn record_assigned(&mut self, cross_zone: bool) {
        self.assigned_total += 1;
        if cross_zone {
            self.cross_zone_total += 1;
        }
    }

    fn record_exhausted(&mut self) {
        self.exhausted_total += 1;
    }
}

/// Pick and reserve the cheapest free slot for `requested_zone`.
///
/// Candidates are ranked ascending by (penalty, slot id) through a min-heap;
/// the winner is marked Allocated before returning. A requested zone that
/// matches no zone id is not an error: every candidate is then cross-zone.
pub fn allocate(
    requested_zone: ZoneId,
    zones: &mut [Zone],
    metrics: &mut AllocationMetrics,
) -> AllocationOutcome {
    let mut candidates: BinaryHeap<Reverse<Candidate>> = BinaryHeap::new();
    for zone in zones.iter() {
        for slot in zone.slots().iter().filter(|s| s.is_free()) {
            candidates.push(Reverse(Candidate {
                cross_zone: zone.id != requested_zone,
                slot: slot.id,
                zone: zone.id,
            }));
        }
    }

    let Some(Reverse(best)) = candidates.pop() else {
        metrics.record_exhausted();
        debug!("no free slot for zone {} request", requested_zone);
        return AllocationOutcome::Exhausted;
    };

    if let Some(slot) = zones
        .iter_mut()
        .find(|z| z.id == best.zone)
        .and_then(|z| z.slot_mut_by_id(best.slot))
    {
        slot.allocate();
    }

    let penalty = if best.cross_zone { CROSS_ZONE_PENALTY } else { 0.0 };
    metrics.record_assigned(best.cross_zone);
    debug!(
        "reserved slot {} in zone {} penalty {:.1}",
        best.slot, best.zone, penalty
    );
    AllocationOutcome::Assigned {
        slot: best.slot,
        zone: best.zone,
        penalty,
    }
}
