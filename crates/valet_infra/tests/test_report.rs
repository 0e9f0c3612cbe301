//! Dashboard snapshots and rendering: what each request row shows per
//! state, the free-slot listing, and the JSON form of a snapshot.

use valet_core::lifecycle::RequestState;
use valet_core::system::ParkingSystem;
use valet_infra::report::{self, DashboardSnapshot, state_label};

/// One zone, two slots, every request state present in the history:
/// AAA allocated, BBB released, CCC cancelled, DDD allocated, EEE queued.
fn mixed_state_lot() -> ParkingSystem {
    let mut system = ParkingSystem::new(1.0);
    let zone = system.add_zone();
    system.add_slots(zone, 2).expect("zone exists");

    system.entry("AAA", 0);
    let b = system.entry("BBB", 0);
    system.occupy(b.request).expect("occupy BBB");
    system.release(b.request).expect("release BBB");
    let c = system.entry("CCC", 0);
    system.cancel(c.request).expect("cancel CCC");
    system.entry("DDD", 0);
    system.entry("EEE", 0);
    system
}

// --- Labels ---

#[test]
fn test_state_labels_are_uppercase_words() {
    assert_eq!(state_label(RequestState::Requested), "REQUESTED");
    assert_eq!(state_label(RequestState::Allocated), "ALLOCATED");
    assert_eq!(state_label(RequestState::Occupied), "OCCUPIED");
    assert_eq!(state_label(RequestState::Released), "RELEASED");
    assert_eq!(state_label(RequestState::Cancelled), "CANCELLED");
}

// --- Snapshot contents ---

#[test]
fn test_snapshot_mirrors_system_state() {
    let system = mixed_state_lot();
    let snapshot = DashboardSnapshot::capture(&system);

    assert_eq!(snapshot.tick, 8);
    assert_eq!(snapshot.revenue, 1.0);
    assert_eq!(snapshot.rate_per_tick, 1.0);
    assert_eq!(snapshot.backlog_depth, 1);

    assert_eq!(snapshot.zones.len(), 1);
    assert_eq!(snapshot.zones[0].zone, 0);
    assert_eq!(snapshot.zones[0].free, 0);
    assert!(snapshot.zones[0].free_slots.is_empty());

    let states: Vec<&str> = snapshot.requests.iter().map(|r| r.state).collect();
    assert_eq!(
        states,
        vec!["ALLOCATED", "RELEASED", "CANCELLED", "ALLOCATED", "REQUESTED"]
    );
}

#[test]
fn test_rows_keep_released_slot_and_hide_cancelled_slot() {
    let system = mixed_state_lot();
    let snapshot = DashboardSnapshot::capture(&system);

    // BBB settled in slot 1 and keeps showing it.
    assert_eq!(snapshot.requests[1].vehicle, "BBB");
    assert_eq!(snapshot.requests[1].slot, Some(1));
    // CCC gave its slot back; the row shows none.
    assert_eq!(snapshot.requests[2].vehicle, "CCC");
    assert_eq!(snapshot.requests[2].slot, None);
    // EEE never had one.
    assert_eq!(snapshot.requests[4].slot, None);
}

// --- Text rendering ---

#[test]
fn test_dashboard_text_lists_zones_and_rows() {
    let system = mixed_state_lot();
    let text = report::render_dashboard(&DashboardSnapshot::capture(&system));

    assert!(text.contains("---------------- DASHBOARD ----------------"));
    assert!(text.contains("Tick: 8\n"));
    assert!(text.contains("Total revenue: 1.00\n"));
    assert!(text.contains("Rate per tick: 1.00\n"));
    assert!(text.contains("  zone 0 - free 0  []\n"));
    assert!(text.contains("  2 BBB RELEASED 1\n"));
    assert!(text.contains("  3 CCC CANCELLED -\n"));
    assert!(text.contains("  5 EEE REQUESTED -\n"));
    assert!(text.contains("Pending queue size: 1\n"));
}

#[test]
fn test_dashboard_lists_free_slot_ids_in_order() {
    let mut system = ParkingSystem::new(1.0);
    let zone = system.add_zone();
    system.add_slots(zone, 3).expect("zone exists");
    system.entry("AAA", 0);

    let text = report::render_dashboard(&DashboardSnapshot::capture(&system));
    assert!(text.contains("  zone 0 - free 2  [1, 2]\n"));
}

#[test]
fn test_stats_line_format() {
    let system = mixed_state_lot();
    let text = report::render_stats(&system.usage_summary());
    assert_eq!(
        text,
        "Completed: 1 Cancelled: 1 AvgTicks: 1.00 Revenue: 1.00\n"
    );
}

// --- JSON form ---

#[test]
fn test_snapshot_serializes_to_json() {
    let system = mixed_state_lot();
    let json = DashboardSnapshot::capture(&system)
        .to_json()
        .expect("snapshot serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["tick"], 8);
    assert_eq!(value["backlog_depth"], 1);
    assert_eq!(value["zones"][0]["free"], 0);
    assert_eq!(value["requests"][1]["slot"], 1);
    assert!(value["requests"][2]["slot"].is_null());
    assert_eq!(value["requests"][4]["state"], "REQUESTED");
}
