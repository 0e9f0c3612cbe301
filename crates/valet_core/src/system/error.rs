//! Operation failures reported to callers. Every variant is recoverable: a
//! failed operation leaves slots, requests, queues, and revenue exactly as
//! they were. Only the operation-counting clock still advances.

use std::error::Error;
use std::fmt;

use crate::lifecycle::RequestState;
use crate::types::{RequestId, ZoneId};

/// Why an operation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// No zone with this id exists.
    UnknownZone { zone: ZoneId },
    /// No request with this id exists.
    UnknownRequest { request: RequestId },
    /// The request's current state does not admit the attempted move.
    InvalidTransition {
        request: RequestId,
        state: RequestState,
    },
    /// No allocated or occupying request exists for this vehicle.
    VehicleNotFound { vehicle: String },
    /// The zone's slot-id block cannot fit the requested batch.
    ZoneExhausted { zone: ZoneId },
    /// Rollback depth must be at least one.
    InvalidRollbackCount { requested: usize },
    /// Fewer recorded allocations than the requested rollback depth.
    InsufficientRollbackHistory { requested: usize, recorded: usize },
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::UnknownZone { zone } => write!(f, "unknown zone {zone}"),
            OperationError::UnknownRequest { request } => {
                write!(f, "unknown request {request}")
            }
            OperationError::InvalidTransition { request, state } => {
                write!(f, "invalid transition for request {request} in {state:?}")
            }
            OperationError::VehicleNotFound { vehicle } => {
                write!(f, "no active request for vehicle {vehicle}")
            }
            OperationError::ZoneExhausted { zone } => {
                write!(f, "zone {zone} slot-id block full")
            }
            OperationError::InvalidRollbackCount { requested } => {
                write!(f, "rollback count must be positive, got {requested}")
            }
            OperationError::InsufficientRollbackHistory {
                requested,
                recorded,
            } => {
                write!(
                    f,
                    "cannot roll back {requested} actions, only {recorded} recorded"
                )
            }
        }
    }
}

impl Error for OperationError {}
