//! Hotkey module for global chord detection
//!
//! Key state is polled rather than delivered as events. On macOS the
//! state comes from CoreGraphics, on Windows from `GetAsyncKeyState`;
//! other platforms have no backend yet.

mod keys;
mod platform;

pub use keys::{Chord, KeySnapshot, KeyState};
pub use platform::default_key_state;

#[cfg(test)]
pub use keys::Key;
#[cfg(all(test, any(target_os = "macos", windows)))]
pub use keys::{LOAD_KEYS, SAVE_KEYS};
