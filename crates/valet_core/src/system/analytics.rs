//! Read-only usage views computed from the history. None of these advance
//! the clock.

use crate::lifecycle::RequestState;
use crate::system::ParkingSystem;
use crate::types::ZoneId;

/// Aggregate figures for the stats line. A request counts as completed once
/// it carries a nonzero duration, which only a released request does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageSummary {
    pub completed: usize,
    pub cancelled: usize,
    pub average_duration_ticks: f64,
    pub revenue: f64,
}

impl ParkingSystem {
    /// Free-slot count per zone, in zone order.
    pub fn free_slots_per_zone(&self) -> Vec<(ZoneId, usize)> {
        self.zones().iter().map(|z| (z.id, z.free_count())).collect()
    }

    /// Completed and cancelled counts, mean completed duration, revenue.
    pub fn usage_summary(&self) -> UsageSummary {
        let mut completed = 0usize;
        let mut total_ticks = 0u64;
        let mut cancelled = 0usize;
        for request in self.history() {
            let duration = request.duration_ticks();
            if duration > 0 {
                completed += 1;
                total_ticks += duration;
            }
            if request.state() == RequestState::Cancelled {
                cancelled += 1;
            }
        }
        let average_duration_ticks = if completed > 0 {
            total_ticks as f64 / completed as f64
        } else {
            0.0
        };
        UsageSummary {
            completed,
            cancelled,
            average_duration_ticks,
            revenue: self.revenue(),
        }
    }
}
