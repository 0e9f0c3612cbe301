//! End-to-end flows through `ParkingSystem`: clock discipline, billing,
//! vehicle-keyed exits, and the read-only views.

mod common;

use common::lot;
use valet_core::alloc::CROSS_ZONE_PENALTY;
use valet_core::lifecycle::RequestState;
use valet_core::lot::SlotStatus;
use valet_core::system::{
    EntryDecision, OperationError, ParkingSystem, UsageSummary,
};

// ─── Clock discipline ───────────────────────────────────────────────────────

#[test]
fn test_fresh_system_is_empty() {
    let system = ParkingSystem::new(1.0);
    assert_eq!(system.tick(), 0);
    assert_eq!(system.revenue(), 0.0);
    assert!(system.zones().is_empty());
    assert!(system.history().is_empty());
    assert_eq!(system.backlog_depth(), 0);
    assert_eq!(system.rollback_depth(), 0);
}

#[test]
fn test_registration_does_not_advance_clock() {
    let mut system = ParkingSystem::new(1.0);
    let zone = system.add_zone();
    let ids = system.add_slots(zone, 3).expect("zone exists");
    assert_eq!(ids, 0..3);
    assert_eq!(system.tick(), 0);
}

#[test]
fn test_first_entry_is_request_one_at_tick_one() {
    let mut system = lot(&[1], 1.0);
    let receipt = system.entry("KA-01-0001", 0);
    assert_eq!(receipt.request, 1);
    assert_eq!(system.tick(), 1);
    let request = system.request(1).expect("request exists");
    assert_eq!(request.created_at(), 1);
}

#[test]
fn test_failed_operations_still_advance_clock() {
    let mut system = lot(&[1], 1.0);

    assert_eq!(
        system.occupy(99),
        Err(OperationError::UnknownRequest { request: 99 })
    );
    assert_eq!(system.tick(), 1);

    assert!(system.release(99).is_err());
    assert_eq!(system.tick(), 2);

    assert!(system.cancel(99).is_err());
    assert_eq!(system.tick(), 3);

    assert!(system.rollback_last(5).is_err());
    assert_eq!(system.tick(), 4);
}

// ─── Billing flows ──────────────────────────────────────────────────────────

#[test]
fn test_two_vehicles_one_release_reallocates_the_waiter() {
    let mut system = lot(&[2], 1.0);

    let a = system.entry("CAR-A", 0);
    let b = system.entry("CAR-B", 0);
    let c = system.entry("CAR-C", 0);
    assert!(matches!(a.decision, EntryDecision::Allocated { slot: 0, .. }));
    assert!(matches!(b.decision, EntryDecision::Allocated { slot: 1, .. }));
    assert_eq!(c.decision, EntryDecision::Queued);
    assert_eq!(system.backlog_depth(), 1);

    system.occupy(a.request).expect("occupy A");
    system.occupy(b.request).expect("occupy B");
    let d = system.entry("CAR-D", 0);
    assert_eq!(d.decision, EntryDecision::Queued);

    // A occupied at tick 4, released at tick 7.
    let settled = system.release(a.request).expect("release A");
    assert_eq!(settled.duration_ticks, 3);
    assert_eq!(settled.charge, 3.0);
    assert_eq!(system.revenue(), 3.0);

    // The freed slot went to C, the oldest waiter; D stays queued.
    let waiter = system.request(c.request).expect("request exists");
    assert_eq!(waiter.state(), RequestState::Allocated);
    assert_eq!(waiter.active_slot(), Some((0, 0)));
    assert_eq!(system.backlog_depth(), 1);

    let metrics = system.metrics();
    assert_eq!(metrics.alloc.assigned_total(), 3);
    assert_eq!(metrics.backlog.enqueued_total(), 2);
    assert_eq!(metrics.backlog.reallocated_total(), 1);
    assert_eq!(metrics.backlog.deferred_total(), 1);
}

#[test]
fn test_cross_zone_fallback_bills_the_penalty() {
    let mut system = lot(&[1, 1], 2.0);

    system.entry("FIL-1", 0);
    let overflow = system.entry("OVF-2", 0);
    assert_eq!(
        overflow.decision,
        EntryDecision::Allocated {
            slot: 1000,
            zone: 1,
            penalty: CROSS_ZONE_PENALTY,
        }
    );

    system.occupy(overflow.request).expect("occupy overflow");
    system.occupy(1).expect("occupy filler");
    let settled = system.release(overflow.request).expect("release overflow");

    // Two ticks at rate 2.0 plus the cross-zone penalty.
    assert_eq!(settled.duration_ticks, 2);
    assert_eq!(settled.charge, 9.0);
    assert_eq!(system.revenue(), 9.0);
}

// ─── Vehicle-keyed operations ───────────────────────────────────────────────

#[test]
fn test_exit_settles_first_active_request_for_vehicle() {
    let mut system = lot(&[1], 1.0);

    let first = system.entry("KA-09-7777", 0);
    system.occupy(first.request).expect("occupy first stay");
    system.release(first.request).expect("release first stay");

    let second = system.entry("KA-09-7777", 0);
    system.occupy(second.request).expect("occupy second stay");

    // The released first stay is skipped; the live second one settles.
    let settled = system.exit_by_vehicle("KA-09-7777").expect("exit");
    assert_eq!(settled.request, second.request);
    assert_eq!(settled.duration_ticks, 1);
    assert_eq!(system.revenue(), 2.0);
}

#[test]
fn test_exit_of_unknown_vehicle_does_not_tick() {
    let mut system = lot(&[1], 1.0);
    system.entry("KA-01-0001", 0);

    let err = system.exit_by_vehicle("GHOST").expect_err("no such vehicle");
    assert_eq!(
        err,
        OperationError::VehicleNotFound {
            vehicle: "GHOST".to_string(),
        }
    );
    assert_eq!(system.tick(), 1);
}

#[test]
fn test_exit_before_occupancy_fails_in_release() {
    let mut system = lot(&[1], 1.0);
    let receipt = system.entry("KA-01-0001", 0);

    // The reserved request matches the scan, then fails release validation.
    // That attempt counts on the clock.
    let err = system.exit_by_vehicle("KA-01-0001").expect_err("not occupied");
    assert_eq!(
        err,
        OperationError::InvalidTransition {
            request: receipt.request,
            state: RequestState::Allocated,
        }
    );
    assert_eq!(system.tick(), 2);
    assert_eq!(system.zones()[0].slots()[0].status(), SlotStatus::Allocated);
}

#[test]
fn test_search_car_returns_first_filing_in_any_state() {
    let mut system = lot(&[2], 1.0);

    let first = system.entry("KA-01-0001", 0);
    system.cancel(first.request).expect("cancel first filing");
    system.entry("KA-01-0001", 0);

    assert_eq!(system.search_car("KA-01-0001"), Some(first.request));
    assert_eq!(system.search_car("GHOST"), None);
    // Search is read-only.
    assert_eq!(system.tick(), 3);
}

// ─── Invariants and views ───────────────────────────────────────────────────

#[test]
fn test_active_slot_tracks_only_live_states() {
    let mut system = lot(&[3], 1.0);

    system.entry("AAA", 0);
    let b = system.entry("BBB", 0);
    system.occupy(b.request).expect("occupy B");
    let c = system.entry("CCC", 0);
    system.cancel(c.request).expect("cancel C");
    let d = system.entry("DDD", 0);
    system.occupy(d.request).expect("occupy D");
    system.release(d.request).expect("release D");

    for request in system.history() {
        match request.state() {
            RequestState::Allocated | RequestState::Occupied => {
                assert!(request.active_slot().is_some(), "request {}", request.id());
            }
            _ => {
                assert!(request.active_slot().is_none(), "request {}", request.id());
            }
        }
    }
}

#[test]
fn test_add_slots_requires_known_zone() {
    let mut system = ParkingSystem::new(1.0);
    assert_eq!(
        system.add_slots(0, 4),
        Err(OperationError::UnknownZone { zone: 0 })
    );
}

#[test]
fn test_zone_slot_id_block_is_bounded() {
    let mut system = ParkingSystem::new(1.0);
    let zone = system.add_zone();

    let ids = system.add_slots(zone, 1000).expect("block fits exactly");
    assert_eq!(ids, 0..1000);
    assert_eq!(
        system.add_slots(zone, 1),
        Err(OperationError::ZoneExhausted { zone })
    );
}

#[test]
fn test_usage_summary_and_zone_occupancy() {
    let mut system = lot(&[2, 1], 1.0);

    let a = system.entry("AAA", 0);
    let b = system.entry("BBB", 0);
    system.occupy(a.request).expect("occupy A");
    system.occupy(b.request).expect("occupy B");
    system.release(a.request).expect("release A");
    system.release(b.request).expect("release B");
    let c = system.entry("CCC", 1);
    system.cancel(c.request).expect("cancel C");

    assert_eq!(
        system.usage_summary(),
        UsageSummary {
            completed: 2,
            cancelled: 1,
            average_duration_ticks: 2.0,
            revenue: 4.0,
        }
    );
    assert_eq!(system.free_slots_per_zone(), vec![(0, 2), (1, 1)]);
}
