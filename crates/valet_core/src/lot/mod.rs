//! Physical lot model: slots, zones, and the ordered slot directory.

pub mod index;
pub mod slot;
pub mod zone;

pub use index::{SlotAddr, SlotIndex};
pub use slot::{ParkingSlot, SlotStatus};
pub use zone::{SLOT_ID_STRIDE, Zone, ZoneCapacityError};
