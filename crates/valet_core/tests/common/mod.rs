//! Shared lot builder for orchestrator tests.

use valet_core::system::ParkingSystem;

/// Build a system with one zone per entry in `slot_counts`, each filled
/// with that many slots.
pub fn lot(slot_counts: &[u32], rate_per_tick: f64) -> ParkingSystem {
    let mut system = ParkingSystem::new(rate_per_tick);
    for &count in slot_counts {
        let zone = system.add_zone();
        system
            .add_slots(zone, count)
            .expect("slot batch fits the id block");
    }
    system
}
