//! Events module for dispatcher outcomes
//!
//! Every tick that acts on a chord produces exactly one event. The
//! dispatcher returns it and broadcasts it to the reporter.

use serde::{Deserialize, Serialize};

use crate::slots::{SlotIndex, SlotListing};

/// Outcome of acting on a recognized chord
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DispatchEvent {
    /// Show-all chord: snapshot of every occupied slot
    Listed { slots: SlotListing },

    /// Clipboard content stored into a slot
    Saved { slot: SlotIndex, preview: String },

    /// Save chord held while the clipboard had no text
    ClipboardEmpty { slot: SlotIndex },

    /// Clipboard read failed on every attempt
    ReadFailed {
        slot: SlotIndex,
        attempts: u32,
        error: String,
    },

    /// Slot content written to the clipboard
    Loaded { slot: SlotIndex, preview: String },

    /// Load chord held for a slot that was never saved
    SlotEmpty { slot: SlotIndex },

    /// Clipboard write failed on every attempt
    WriteFailed {
        slot: SlotIndex,
        attempts: u32,
        error: String,
    },
}

impl DispatchEvent {
    /// Whether this outcome consumed the debounce window
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            DispatchEvent::Listed { .. } | DispatchEvent::Saved { .. } | DispatchEvent::Loaded { .. }
        )
    }
}

impl std::fmt::Display for DispatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchEvent::Listed { slots } => {
                write!(f, "LISTED ({} occupied)", slots.slots.len())
            }
            DispatchEvent::Saved { slot, preview } => write!(f, "SAVED slot {slot}: {preview}"),
            DispatchEvent::ClipboardEmpty { slot } => {
                write!(f, "CLIPBOARD_EMPTY (slot {slot} unchanged)")
            }
            DispatchEvent::ReadFailed {
                slot,
                attempts,
                error,
            } => write!(f, "READ_FAILED slot {slot} after {attempts} attempts: {error}"),
            DispatchEvent::Loaded { slot, preview } => write!(f, "LOADED slot {slot}: {preview}"),
            DispatchEvent::SlotEmpty { slot } => write!(f, "SLOT_EMPTY slot {slot}"),
            DispatchEvent::WriteFailed {
                slot,
                attempts,
                error,
            } => write!(f, "WRITE_FAILED slot {slot} after {attempts} attempts: {error}"),
        }
    }
}
