//! Request lifecycle: the per-request record and its state machine.

pub mod request;

pub use request::{
    ParkingRequest, RequestEvent, RequestPhase, RequestState, TransitionOutcome,
};
