//! Identifier and clock aliases shared across the engine.

/// Zone identifier. Zones are numbered sequentially from zero.
pub type ZoneId = u32;

/// Slot identifier, unique across the whole lot (`zone * 1000 + offset`).
pub type SlotId = u32;

/// Request identifier, assigned monotonically starting at one.
pub type RequestId = u64;

/// Logical clock value. The clock counts operations, not wall time.
pub type Tick = u64;
