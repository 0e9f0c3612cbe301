//! Allocation machinery: slot selection, the pending backlog, and the
//! rollback log.

pub mod backlog;
pub mod engine;
pub mod rollback;

pub use backlog::{BacklogMetrics, PendingBacklog};
pub use engine::{AllocationMetrics, AllocationOutcome, CROSS_ZONE_PENALTY, allocate};
pub use rollback::{RollbackEntry, RollbackManager, RollbackMetrics};
