//! Dashboard and stats rendering. Core types stay serde-free; this module
//! mirrors what it needs into serializable rows and renders the text views
//! the console prints.

use serde::Serialize;

use valet_core::lifecycle::{RequestPhase, RequestState};
use valet_core::system::{ParkingSystem, UsageSummary};
use valet_core::types::SlotId;

/// Printable label for a request state.
pub fn state_label(state: RequestState) -> &'static str {
    match state {
        RequestState::Requested => "REQUESTED",
        RequestState::Allocated => "ALLOCATED",
        RequestState::Occupied => "OCCUPIED",
        RequestState::Released => "RELEASED",
        RequestState::Cancelled => "CANCELLED",
    }
}

/// Slot shown for a request row: any slot the request is or was bound to.
/// A released request keeps showing the slot it settled; a cancelled one
/// shows none.
fn displayed_slot(phase: RequestPhase) -> Option<SlotId> {
    match phase {
        RequestPhase::Allocated { slot, .. }
        | RequestPhase::Occupied { slot, .. }
        | RequestPhase::Released { slot, .. } => Some(slot),
        RequestPhase::Requested | RequestPhase::Cancelled => None,
    }
}

/// Free-slot picture of one zone.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneReport {
    pub zone: u32,
    pub free: usize,
    pub free_slots: Vec<u32>,
}

/// One history row.
#[derive(Debug, Clone, Serialize)]
pub struct RequestRow {
    pub request: u64,
    pub vehicle: String,
    pub state: &'static str,
    pub slot: Option<u32>,
}

/// Point-in-time picture of the whole lot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub tick: u64,
    pub revenue: f64,
    pub rate_per_tick: f64,
    pub backlog_depth: usize,
    pub zones: Vec<ZoneReport>,
    pub requests: Vec<RequestRow>,
}

impl DashboardSnapshot {
    /// Copy the current lot state into a serializable snapshot.
    pub fn capture(system: &ParkingSystem) -> Self {
        let zones = system
            .zones()
            .iter()
            .map(|z| ZoneReport {
                zone: z.id,
                free: z.free_count(),
                free_slots: z.free_slot_ids(),
            })
            .collect();
        let requests = system
            .history()
            .iter()
            .map(|r| RequestRow {
                request: r.id(),
                vehicle: r.vehicle().to_string(),
                state: state_label(r.state()),
                slot: displayed_slot(r.phase()),
            })
            .collect();
        Self {
            tick: system.tick(),
            revenue: system.revenue(),
            rate_per_tick: system.rate_per_tick(),
            backlog_depth: system.backlog_depth(),
            zones,
            requests,
        }
    }

    /// The snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Multi-line text dashboard.
pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    out.push_str("---------------- DASHBOARD ----------------\n");
    out.push_str(&format!("Tick: {}\n", snapshot.tick));
    out.push_str(&format!("Total revenue: {:.2}\n", snapshot.revenue));
    out.push_str(&format!("Rate per tick: {:.2}\n", snapshot.rate_per_tick));
    out.push_str("Free slots by zone:\n");
    for zone in &snapshot.zones {
        let ids = zone
            .free_slots
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "  zone {} - free {}  [{}]\n",
            zone.zone, zone.free, ids
        ));
    }
    out.push_str("Requests (id vehicle state slot):\n");
    for row in &snapshot.requests {
        let slot = row
            .slot
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        out.push_str(&format!(
            "  {} {} {} {}\n",
            row.request, row.vehicle, row.state, slot
        ));
    }
    out.push_str(&format!("Pending queue size: {}\n", snapshot.backlog_depth));
    out.push_str("-------------------------------------------\n");
    out
}

/// One-line stats summary.
pub fn render_stats(summary: &UsageSummary) -> String {
    format!(
        "Completed: {} Cancelled: {} AvgTicks: {:.2} Revenue: {:.2}\n",
        summary.completed, summary.cancelled, summary.average_duration_ticks, summary.revenue
    )
}
