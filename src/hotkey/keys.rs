//! Key definitions, chord vocabulary and per-tick key snapshots
//!
//! Every chord requires Control + Shift plus exactly one action key:
//! F1..F8 save into slots 0..7, digits 1..8 load slots 0..7, and F9
//! lists all occupied slots.

use crate::slots::{SlotIndex, SLOT_COUNT};

/// Abstract identifier for a physical key the daemon watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Control,
    Shift,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
}

/// Action keys that save into slots 0..7
pub const SAVE_KEYS: [Key; SLOT_COUNT] = [
    Key::F1,
    Key::F2,
    Key::F3,
    Key::F4,
    Key::F5,
    Key::F6,
    Key::F7,
    Key::F8,
];

/// Action keys that load slots 0..7
pub const LOAD_KEYS: [Key; SLOT_COUNT] = [
    Key::Digit1,
    Key::Digit2,
    Key::Digit3,
    Key::Digit4,
    Key::Digit5,
    Key::Digit6,
    Key::Digit7,
    Key::Digit8,
];

/// Action key that lists every occupied slot
pub const SHOW_ALL_KEY: Key = Key::F9;

impl Key {
    /// Label used in log output
    pub fn label(self) -> &'static str {
        match self {
            Key::Control => "Ctrl",
            Key::Shift => "Shift",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::Digit1 => "1",
            Key::Digit2 => "2",
            Key::Digit3 => "3",
            Key::Digit4 => "4",
            Key::Digit5 => "5",
            Key::Digit6 => "6",
            Key::Digit7 => "7",
            Key::Digit8 => "8",
        }
    }
}

/// Source of instantaneous physical key state.
///
/// Implementations must report a key whose state cannot be queried as
/// not pressed.
pub trait KeyState {
    fn is_pressed(&self, key: Key) -> bool;
}

/// A recognized key combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chord {
    /// Ctrl+Shift+F9
    ShowAll,
    /// Ctrl+Shift+F1..F8
    Save(SlotIndex),
    /// Ctrl+Shift+1..8
    Load(SlotIndex),
}

impl Chord {
    /// The action key that completes this chord
    pub fn action_key(self) -> Key {
        match self {
            Chord::ShowAll => SHOW_ALL_KEY,
            Chord::Save(slot) => SAVE_KEYS[slot.get()],
            Chord::Load(slot) => LOAD_KEYS[slot.get()],
        }
    }
}

impl std::fmt::Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}+{}+{}",
            Key::Control.label(),
            Key::Shift.label(),
            self.action_key().label()
        )
    }
}

/// Tracks whether both chord modifiers are held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    /// Control key is held
    pub control: bool,
    /// Shift key is held
    pub shift: bool,
}

impl ModifierState {
    /// Both modifiers required by every chord are held
    pub fn is_chord_ready(&self) -> bool {
        self.control && self.shift
    }
}

/// Press state of every key of interest, captured once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub modifiers: ModifierState,
    pub show_all: bool,
    pub save: [bool; SLOT_COUNT],
    pub load: [bool; SLOT_COUNT],
}

impl KeySnapshot {
    /// Query all 19 keys of interest
    pub fn capture(keys: &dyn KeyState) -> Self {
        Self {
            modifiers: ModifierState {
                control: keys.is_pressed(Key::Control),
                shift: keys.is_pressed(Key::Shift),
            },
            show_all: keys.is_pressed(SHOW_ALL_KEY),
            save: SAVE_KEYS.map(|key| keys.is_pressed(key)),
            load: LOAD_KEYS.map(|key| keys.is_pressed(key)),
        }
    }

    /// The held chord with the highest priority, if any.
    ///
    /// Priority is fixed: show-all, then saves by slot index, then loads
    /// by slot index.
    pub fn recognize(&self) -> Option<Chord> {
        if !self.modifiers.is_chord_ready() {
            return None;
        }

        if self.show_all {
            return Some(Chord::ShowAll);
        }

        let first_held = |held: &[bool; SLOT_COUNT]| {
            SlotIndex::all().find(|slot| held[slot.get()])
        };

        first_held(&self.save)
            .map(Chord::Save)
            .or_else(|| first_held(&self.load).map(Chord::Load))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct Held(HashSet<Key>);

    impl Held {
        fn new(keys: &[Key]) -> Self {
            Self(keys.iter().copied().collect())
        }
    }

    impl KeyState for Held {
        fn is_pressed(&self, key: Key) -> bool {
            self.0.contains(&key)
        }
    }

    fn slot(i: u8) -> SlotIndex {
        SlotIndex::new(i).unwrap()
    }

    fn recognize(keys: &[Key]) -> Option<Chord> {
        KeySnapshot::capture(&Held::new(keys)).recognize()
    }

    #[test]
    fn test_nothing_held() {
        let snapshot = KeySnapshot::capture(&Held::new(&[]));
        assert_eq!(snapshot, KeySnapshot::default());
        assert_eq!(snapshot.recognize(), None);
    }

    #[test]
    fn test_modifiers_required() {
        assert_eq!(recognize(&[Key::F1]), None);
        assert_eq!(recognize(&[Key::Control, Key::F1]), None);
        assert_eq!(recognize(&[Key::Shift, Key::Digit3]), None);
        assert_eq!(recognize(&[Key::Control, Key::Shift]), None);
    }

    #[test]
    fn test_save_chords_map_to_slots() {
        for (i, key) in SAVE_KEYS.iter().enumerate() {
            let chord = recognize(&[Key::Control, Key::Shift, *key]);
            assert_eq!(chord, Some(Chord::Save(slot(i as u8))));
        }
    }

    #[test]
    fn test_load_chords_map_to_slots() {
        for (i, key) in LOAD_KEYS.iter().enumerate() {
            let chord = recognize(&[Key::Control, Key::Shift, *key]);
            assert_eq!(chord, Some(Chord::Load(slot(i as u8))));
        }
    }

    #[test]
    fn test_show_all_beats_save() {
        let chord = recognize(&[Key::Control, Key::Shift, Key::F9, Key::F2]);
        assert_eq!(chord, Some(Chord::ShowAll));
    }

    #[test]
    fn test_save_beats_load() {
        let chord = recognize(&[Key::Control, Key::Shift, Key::Digit1, Key::F5]);
        assert_eq!(chord, Some(Chord::Save(slot(4))));
    }

    #[test]
    fn test_lowest_index_wins() {
        let chord = recognize(&[Key::Control, Key::Shift, Key::F8, Key::F3]);
        assert_eq!(chord, Some(Chord::Save(slot(2))));

        let chord = recognize(&[Key::Control, Key::Shift, Key::Digit7, Key::Digit6]);
        assert_eq!(chord, Some(Chord::Load(slot(5))));
    }

    #[test]
    fn test_chord_display() {
        assert_eq!(Chord::ShowAll.to_string(), "Ctrl+Shift+F9");
        assert_eq!(Chord::Save(slot(0)).to_string(), "Ctrl+Shift+F1");
        assert_eq!(Chord::Load(slot(7)).to_string(), "Ctrl+Shift+8");
    }
}
