//! Per-request state machine. A request moves through at most one allocation
//! cycle: Requested -> Allocated -> Occupied -> Released, with Cancelled
//! reachable from the first two states only. Released and Cancelled are
//! terminal. An event that does not fit the current phase is rejected and
//! the record is left untouched.

use crate::types::{RequestId, SlotId, Tick, ZoneId};

// ─── States ─────────────────────────────────────────────────────────────────

/// Flat view of a request's phase, for matching and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestState {
    Requested,
    Allocated,
    Occupied,
    Released,
    Cancelled,
}

impl RequestState {
    /// Whether this state is terminal (no further transitions accepted).
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestState::Released | RequestState::Cancelled)
    }
}

// ─── Phases ─────────────────────────────────────────────────────────────────

/// Tagged phase of a request. Slot bindings and tick stamps exist only in
/// the phases where they mean something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Requested,
    Allocated {
        slot: SlotId,
        zone: ZoneId,
        since: Tick,
    },
    Occupied {
        slot: SlotId,
        zone: ZoneId,
        since: Tick,
    },
    Released {
        slot: SlotId,
        zone: ZoneId,
        since: Tick,
        until: Tick,
    },
    Cancelled,
}

impl RequestPhase {
    pub fn state(&self) -> RequestState {
        match self {
            RequestPhase::Requested => RequestState::Requested,
            RequestPhase::Allocated { .. } => RequestState::Allocated,
            RequestPhase::Occupied { .. } => RequestState::Occupied,
            RequestPhase::Released { .. } => RequestState::Released,
            RequestPhase::Cancelled => RequestState::Cancelled,
        }
    }
}

// ─── Events ─────────────────────────────────────────────────────────────────

/// Lifecycle events, stamped with the tick at which they are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestEvent {
    Allocate {
        slot: SlotId,
        zone: ZoneId,
        penalty: f64,
        tick: Tick,
    },
    Occupy {
        tick: Tick,
    },
    Release {
        tick: Tick,
    },
    Cancel,
}

// ─── Outcome ────────────────────────────────────────────────────────────────

/// Result of feeding one event to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The event fit the current phase and was applied.
    Applied {
        from: RequestState,
        to: RequestState,
    },
    /// The event does not fit the current phase; nothing changed.
    Rejected { state: RequestState },
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied { .. })
    }
}

// ─── Request record ─────────────────────────────────────────────────────────

/// One parking request, from arrival to a terminal phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingRequest {
    id: RequestId,
    vehicle: String,
    requested_zone: ZoneId,
    created_at: Tick,
    penalty: f64,
    phase: RequestPhase,
}

impl ParkingRequest {
    pub fn new(
        id: RequestId,
        vehicle: impl Into<String>,
        requested_zone: ZoneId,
        created_at: Tick,
    ) -> Self {
        Self {
            id,
            vehicle: vehicle.into(),
            requested_zone,
            created_at,
            penalty: 0.0,
            phase: RequestPhase::Requested,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn vehicle(&self) -> &str {
        &self.vehicle
    }

    pub fn requested_zone(&self) -> ZoneId {
        self.requested_zone
    }

    pub fn created_at(&self) -> Tick {
        self.created_at
    }

    /// Cross-zone penalty attached at allocation time, zero before that.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn state(&self) -> RequestState {
        self.phase.state()
    }

    /// Slot currently bound to the request. Some exactly while the request
    /// holds a reservation or an occupancy.
    pub fn active_slot(&self) -> Option<(SlotId, ZoneId)> {
        match self.phase {
            RequestPhase::Allocated { slot, zone, .. }
            | RequestPhase::Occupied { slot, zone, .. } => Some((slot, zone)),
            _ => None,
        }
    }

    /// Ticks between occupancy and release. Zero until the request has
    /// finished a full occupy/release cycle.
    pub fn duration_ticks(&self) -> u64 {
        match self.phase {
            RequestPhase::Released { since, until, .. } => until - since,
            _ => 0,
        }
    }

    /// Apply one lifecycle event. An illegal pairing reports the phase it
    /// was rejected in and mutates nothing.
    pub fn apply(&mut self, event: RequestEvent) -> TransitionOutcome {
        let from = self.state();
        let next = match (self.phase, event) {
            (
                RequestPhase::Requested,
                RequestEvent::Allocate {
                    slot,
                    zone,
                    penalty,
                    tick,
                },
            ) => {
                self.penalty = penalty;
                RequestPhase::Allocated {
                    slot,
                    zone,
                    since: tick,
                }
            }
            (RequestPhase::Requested, RequestEvent::Cancel) => RequestPhase::Cancelled,
            (RequestPhase::Allocated { slot, zone, .. }, RequestEvent::Occupy { tick }) => {
                RequestPhase::Occupied {
                    slot,
                    zone,
                    since: tick,
                }
            }
            (RequestPhase::Allocated { .. }, RequestEvent::Cancel) => RequestPhase::Cancelled,
            (RequestPhase::Occupied { slot, zone, since }, RequestEvent::Release { tick }) => {
                RequestPhase::Released {
                    slot,
                    zone,
                    since,
                    until: tick,
                }
            }
            _ => return TransitionOutcome::Rejected { state: from },
        };
        self.phase = next;
        TransitionOutcome::Applied {
            from,
            to: self.phase.state(),
        }
    }
}
