//! Thread-safe slot store
//!
//! Writes take the lock exclusively, reads share it. A reader always sees
//! either the old or the new value of a slot, never a partial write.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// Number of slots managed by the store
pub const SLOT_COUNT: usize = 8;

/// Marker appended to truncated previews
const ELLIPSIS: &str = "...";

/// Index of one of the eight slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// Create a slot index, or `None` if it is out of range
    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < SLOT_COUNT).then_some(Self(index))
    }

    /// All slot indices in ascending order
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..SLOT_COUNT as u8).map(SlotIndex)
    }

    /// Zero-based position of this slot
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for SlotIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("slot index {value} out of range"))
    }
}

impl From<SlotIndex> for u8 {
    fn from(slot: SlotIndex) -> Self {
        slot.0
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Preview of a single occupied slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPreview {
    pub slot: SlotIndex,
    pub preview: String,
}

/// Snapshot of every occupied slot, in index order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotListing {
    pub slots: Vec<SlotPreview>,
}

impl SlotListing {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Display for SlotListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== stored slots ===")?;
        writeln!(f, "save: F1(0) F2(1) F3(2) F4(3) F5(4) F6(5) F7(6) F8(7)")?;
        writeln!(f, "load:  1(0)  2(1)  3(2)  4(3)  5(4)  6(5)  7(6)  8(7)")?;
        writeln!(f, "--------------------")?;
        if self.slots.is_empty() {
            writeln!(f, "no slots stored")?;
        } else {
            for entry in &self.slots {
                writeln!(f, "slot {}: {}", entry.slot, entry.preview)?;
            }
        }
        write!(f, "====================")
    }
}

/// In-memory store for the eight clipboard slots
pub struct SlotStore {
    slots: RwLock<[Option<String>; SLOT_COUNT]>,
    preview_chars: usize,
}

impl SlotStore {
    /// Create an empty store whose previews are capped at `preview_chars`
    pub fn new(preview_chars: usize) -> Self {
        Self {
            slots: RwLock::new(Default::default()),
            preview_chars,
        }
    }

    /// Overwrite the content of `slot`
    pub async fn save(&self, slot: SlotIndex, content: String) {
        let shown = preview(&content, self.preview_chars);
        self.slots.write().await[slot.get()] = Some(content);
        info!(slot = %slot, preview = %shown, "slot saved");
    }

    /// Content of `slot`, if anything has been saved there
    pub async fn load(&self, slot: SlotIndex) -> Option<String> {
        self.slots.read().await[slot.get()].clone()
    }

    /// Previews of all occupied slots
    pub async fn show_all(&self) -> SlotListing {
        let slots = self.slots.read().await;
        let slots = SlotIndex::all()
            .filter_map(|slot| {
                slots[slot.get()].as_deref().map(|content| SlotPreview {
                    slot,
                    preview: preview(content, self.preview_chars),
                })
            })
            .collect();

        SlotListing { slots }
    }

    /// Preview length used by this store
    pub fn preview_chars(&self) -> usize {
        self.preview_chars
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new(50)
    }
}
