//! The orchestrator. `ParkingSystem` owns every moving part of the lot and
//! exposes one synchronous method per operation. A logical clock advances
//! once per mutating operation, whether or not the operation then passes
//! validation; registration and read-only calls never touch it.

pub mod analytics;
pub mod error;

pub use analytics::UsageSummary;
pub use error::OperationError;

use std::ops::Range;

use tracing::debug;

use crate::alloc::{
    AllocationMetrics, AllocationOutcome, BacklogMetrics, PendingBacklog, RollbackEntry,
    RollbackManager, RollbackMetrics, allocate,
};
use crate::lifecycle::{ParkingRequest, RequestEvent, RequestState};
use crate::lot::{ParkingSlot, SlotAddr, SlotIndex, Zone};
use crate::types::{RequestId, SlotId, Tick, ZoneId};

// ─── Receipts ───────────────────────────────────────────────────────────────

/// What `entry` decided for a new request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryDecision {
    /// A slot was reserved immediately.
    Allocated {
        slot: SlotId,
        zone: ZoneId,
        penalty: f64,
    },
    /// No slot was free; the request waits in the backlog.
    Queued,
}

/// Receipt returned by `entry`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryReceipt {
    pub request: RequestId,
    pub decision: EntryDecision,
}

impl EntryReceipt {
    /// Penalty attached to the allocation, zero while queued.
    pub fn penalty(&self) -> f64 {
        match self.decision {
            EntryDecision::Allocated { penalty, .. } => penalty,
            EntryDecision::Queued => 0.0,
        }
    }
}

/// Receipt returned when an occupancy is settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseReceipt {
    pub request: RequestId,
    pub duration_ticks: u64,
    pub charge: f64,
}

// ─── Metrics ────────────────────────────────────────────────────────────────

/// Counters for every engine component, owned by the orchestrator.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    pub alloc: AllocationMetrics,
    pub backlog: BacklogMetrics,
    pub rollback: RollbackMetrics,
}

// ─── System ─────────────────────────────────────────────────────────────────

/// Whole-lot state and the operations over it. Single-threaded by
/// construction: callers wanting shared access serialize it externally.
#[derive(Debug)]
pub struct ParkingSystem {
    zones: Vec<Zone>,
    index: SlotIndex,
    history: Vec<ParkingRequest>,
    backlog: PendingBacklog,
    rollback: RollbackManager,
    next_request: RequestId,
    tick: Tick,
    revenue: f64,
    rate_per_tick: f64,
    metrics: EngineMetrics,
}

impl ParkingSystem {
    pub fn new(rate_per_tick: f64) -> Self {
        Self {
            zones: Vec::new(),
            index: SlotIndex::new(),
            history: Vec::new(),
            backlog: PendingBacklog::new(),
            rollback: RollbackManager::new(),
            next_request: 1,
            tick: 0,
            revenue: 0.0,
            rate_per_tick,
            metrics: EngineMetrics::default(),
        }
    }

    /// Build a system with `zone_count` empty zones already registered.
    pub fn with_zones(zone_count: u32, rate_per_tick: f64) -> Self {
        let mut system = Self::new(rate_per_tick);
        for _ in 0..zone_count {
            system.add_zone();
        }
        system
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn rate_per_tick(&self) -> f64 {
        self.rate_per_tick
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn history(&self) -> &[ParkingRequest] {
        &self.history
    }

    pub fn backlog_depth(&self) -> usize {
        self.backlog.len()
    }

    pub fn rollback_depth(&self) -> usize {
        self.rollback.len()
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// Look up a request by id. Ids map to history positions because
    /// rollback replaces records in place instead of appending.
    pub fn request(&self, id: RequestId) -> Option<&ParkingRequest> {
        let pos = usize::try_from(id.checked_sub(1)?).ok()?;
        self.history.get(pos)
    }

    fn request_mut(&mut self, id: RequestId) -> Option<&mut ParkingRequest> {
        let pos = usize::try_from(id.checked_sub(1)?).ok()?;
        self.history.get_mut(pos)
    }

    fn indexed_slot_mut(&mut self, slot: SlotId) -> Option<&mut ParkingSlot> {
        let SlotAddr { zone, pos } = self.index.find(slot)?;
        self.zones.get_mut(zone)?.slot_at_mut(pos)
    }

    fn advance_clock(&mut self) -> Tick {
        self.tick += 1;
        self.tick
    }

    // ─── Registration ───────────────────────────────────────────────────────

    /// Register a new empty zone. Does not advance the clock.
    pub fn add_zone(&mut self) -> ZoneId {
        let id = self.zones.len() as ZoneId;
        self.zones.push(Zone::new(id));
        id
    }

    /// Append `count` slots to a zone and index each new id. Does not
    /// advance the clock.
    pub fn add_slots(
        &mut self,
        zone: ZoneId,
        count: u32,
    ) -> Result<Range<SlotId>, OperationError> {
        let zone_pos = zone as usize;
        let Some(target) = self.zones.get_mut(zone_pos) else {
            return Err(OperationError::UnknownZone { zone });
        };
        let start_pos = target.len();
        let ids = target
            .add_slots(count)
            .map_err(|_| OperationError::ZoneExhausted { zone })?;
        for (offset, id) in ids.clone().enumerate() {
            self.index.insert(
                id,
                SlotAddr {
                    zone: zone_pos,
                    pos: start_pos + offset,
                },
            );
        }
        Ok(ids)
    }

    // ─── Operations ─────────────────────────────────────────────────────────

    /// Admit a vehicle. Always produces a request; when no slot is free the
    /// request waits in the backlog at zero penalty.
    pub fn entry(&mut self, vehicle: impl Into<String>, requested_zone: ZoneId) -> EntryReceipt {
        let now = self.advance_clock();
        let id = self.next_request;
        self.next_request += 1;
        self.history
            .push(ParkingRequest::new(id, vehicle, requested_zone, now));

        match allocate(requested_zone, &mut self.zones, &mut self.metrics.alloc) {
            AllocationOutcome::Assigned { slot, zone, penalty } => {
                if let Some(record) = self.request_mut(id) {
                    record.apply(RequestEvent::Allocate {
                        slot,
                        zone,
                        penalty,
                        tick: now,
                    });
                }
                self.rollback.record(RollbackEntry {
                    request: id,
                    slot,
                    zone,
                    prior_state: RequestState::Requested,
                });
                self.metrics.rollback.record_recorded();
                EntryReceipt {
                    request: id,
                    decision: EntryDecision::Allocated { slot, zone, penalty },
                }
            }
            AllocationOutcome::Exhausted => {
                self.backlog.push(id);
                self.metrics.backlog.record_enqueued();
                EntryReceipt {
                    request: id,
                    decision: EntryDecision::Queued,
                }
            }
        }
    }

    /// Move an allocated request into physical occupancy.
    pub fn occupy(&mut self, request: RequestId) -> Result<(), OperationError> {
        let now = self.advance_clock();
        let Some(record) = self.request_mut(request) else {
            return Err(OperationError::UnknownRequest { request });
        };
        let outcome = record.apply(RequestEvent::Occupy { tick: now });
        if !outcome.is_applied() {
            return Err(OperationError::InvalidTransition {
                request,
                state: record.state(),
            });
        }
        let held = record.active_slot();
        if let Some((slot_id, _)) = held {
            if let Some(slot) = self.indexed_slot_mut(slot_id) {
                slot.occupy(now);
            }
        }
        Ok(())
    }

    /// Settle an occupancy: bill it, free the slot, let the backlog retry.
    pub fn release(&mut self, request: RequestId) -> Result<ReleaseReceipt, OperationError> {
        let now = self.advance_clock();
        let Some(record) = self.request_mut(request) else {
            return Err(OperationError::UnknownRequest { request });
        };
        let held = record.active_slot();
        let outcome = record.apply(RequestEvent::Release { tick: now });
        if !outcome.is_applied() {
            return Err(OperationError::InvalidTransition {
                request,
                state: record.state(),
            });
        }
        let duration_ticks = record.duration_ticks();
        let penalty = record.penalty();

        let charge = duration_ticks as f64 * self.rate_per_tick + penalty;
        self.revenue += charge;

        if let Some((slot_id, _)) = held {
            if let Some(slot) = self.indexed_slot_mut(slot_id) {
                slot.release();
                self.retry_pending();
            }
        }

        Ok(ReleaseReceipt {
            request,
            duration_ticks,
            charge,
        })
    }

    /// Settle the first allocated-or-occupying request found for a vehicle,
    /// scanning history in insertion order. A merely allocated match still
    /// goes through `release` and fails there.
    pub fn exit_by_vehicle(&mut self, vehicle: &str) -> Result<ReleaseReceipt, OperationError> {
        let target = self
            .history
            .iter()
            .find(|r| {
                r.vehicle() == vehicle
                    && matches!(
                        r.state(),
                        RequestState::Occupied | RequestState::Allocated
                    )
            })
            .map(ParkingRequest::id);
        let Some(id) = target else {
            return Err(OperationError::VehicleNotFound {
                vehicle: vehicle.to_string(),
            });
        };
        self.release(id)
    }

    /// Abort a request before occupancy. A reserved slot goes back to the
    /// pool and the backlog gets a retry pass.
    pub fn cancel(&mut self, request: RequestId) -> Result<(), OperationError> {
        self.advance_clock();
        let Some(record) = self.request_mut(request) else {
            return Err(OperationError::UnknownRequest { request });
        };
        let held = record.active_slot();
        let outcome = record.apply(RequestEvent::Cancel);
        if !outcome.is_applied() {
            return Err(OperationError::InvalidTransition {
                request,
                state: record.state(),
            });
        }
        if let Some((slot_id, _)) = held {
            if let Some(slot) = self.indexed_slot_mut(slot_id) {
                slot.release();
                self.retry_pending();
            }
        }
        Ok(())
    }

    /// Undo the `count` most recent allocations, newest first. Each undone
    /// action frees its slot outright, whatever the slot is doing now, and
    /// resets the request to a fresh Requested record with the same id,
    /// vehicle, and requested zone. Billed revenue stays billed, and the
    /// freed slots do not trigger a backlog retry.
    pub fn rollback_last(&mut self, count: usize) -> Result<(), OperationError> {
        self.advance_clock();
        if count == 0 {
            return Err(OperationError::InvalidRollbackCount { requested: count });
        }
        let recorded = self.rollback.len();
        if recorded < count {
            return Err(OperationError::InsufficientRollbackHistory {
                requested: count,
                recorded,
            });
        }
        for _ in 0..count {
            let Some(entry) = self.rollback.pop() else {
                break;
            };
            self.undo_allocation(entry);
            self.metrics.rollback.record_undone();
        }
        Ok(())
    }

    /// First request ever filed for a vehicle, any state. Read-only.
    pub fn search_car(&self, vehicle: &str) -> Option<RequestId> {
        self.history
            .iter()
            .find(|r| r.vehicle() == vehicle)
            .map(ParkingRequest::id)
    }

    // ─── Internals ──────────────────────────────────────────────────────────

    fn undo_allocation(&mut self, entry: RollbackEntry) {
        let now = self.tick;
        let Some(record) = self.request_mut(entry.request) else {
            return;
        };
        let vehicle = record.vehicle().to_string();
        let requested_zone = record.requested_zone();
        if let Some(slot) = self.indexed_slot_mut(entry.slot) {
            slot.release();
        }
        if let Some(record) = self.request_mut(entry.request) {
            *record = ParkingRequest::new(entry.request, vehicle, requested_zone, now);
        }
        debug!(
            "rolled back slot {} reservation for request {}",
            entry.slot, entry.request
        );
    }

    /// One backlog pass after a slot frees. Oldest first; ids whose request
    /// has moved on are dropped; the first id that still cannot be placed
    /// goes back to the end of the line and the pass stops there, even when
    /// later entries would fit.
    fn retry_pending(&mut self) {
        let attempts = self.backlog.len();
        for _ in 0..attempts {
            let Some(id) = self.backlog.pop() else {
                break;
            };
            self.metrics.backlog.record_retried();
            let Some(record) = self.request(id) else {
                self.metrics.backlog.record_dropped();
                continue;
            };
            if record.state() != RequestState::Requested {
                self.metrics.backlog.record_dropped();
                continue;
            }
            let requested_zone = record.requested_zone();
            match allocate(requested_zone, &mut self.zones, &mut self.metrics.alloc) {
                AllocationOutcome::Assigned { slot, zone, penalty } => {
                    let now = self.tick;
                    if let Some(record) = self.request_mut(id) {
                        record.apply(RequestEvent::Allocate {
                            slot,
                            zone,
                            penalty,
                            tick: now,
                        });
                    }
                    self.rollback.record(RollbackEntry {
                        request: id,
                        slot,
                        zone,
                        prior_state: RequestState::Requested,
                    });
                    self.metrics.rollback.record_recorded();
                    self.metrics.backlog.record_reallocated();
                    debug!("backlog request {} took slot {}", id, slot);
                }
                AllocationOutcome::Exhausted => {
                    self.backlog.requeue(id);
                    self.metrics.backlog.record_deferred();
                    debug!("backlog retry stopped at request {}", id);
                    break;
                }
            }
        }
    }
}
