//! Slot storage module
//!
//! Eight independent in-memory slots addressed by index 0..=7.
//! Contents live for the lifetime of the process and are never persisted.

mod store;

pub use store::{preview, SlotIndex, SlotListing, SlotStore, SLOT_COUNT};
