//! Key-state polling via CoreGraphics
//!
//! Reads the combined session key state, which reflects every keyboard
//! attached to the current login session. Requires the Input Monitoring
//! permission; without it every key reads as released.

use core_graphics::event::CGKeyCode;
use core_graphics::event_source::CGEventSourceStateID;
use tracing::debug;

use crate::hotkey::keys::{Key, KeyState};

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGEventSourceKeyState(state_id: CGEventSourceStateID, key: CGKeyCode) -> bool;
}

/// macOS virtual key codes (Carbon-style)
mod vk {
    use core_graphics::event::CGKeyCode;

    pub const SHIFT: CGKeyCode = 0x38;
    pub const CONTROL: CGKeyCode = 0x3B;
    pub const RIGHT_SHIFT: CGKeyCode = 0x3C;
    pub const RIGHT_CONTROL: CGKeyCode = 0x3E;

    pub const F1: CGKeyCode = 0x7A;
    pub const F2: CGKeyCode = 0x78;
    pub const F3: CGKeyCode = 0x63;
    pub const F4: CGKeyCode = 0x76;
    pub const F5: CGKeyCode = 0x60;
    pub const F6: CGKeyCode = 0x61;
    pub const F7: CGKeyCode = 0x62;
    pub const F8: CGKeyCode = 0x64;
    pub const F9: CGKeyCode = 0x65;

    pub const ANSI_1: CGKeyCode = 0x12;
    pub const ANSI_2: CGKeyCode = 0x13;
    pub const ANSI_3: CGKeyCode = 0x14;
    pub const ANSI_4: CGKeyCode = 0x15;
    pub const ANSI_5: CGKeyCode = 0x17;
    pub const ANSI_6: CGKeyCode = 0x16;
    pub const ANSI_7: CGKeyCode = 0x1A;
    pub const ANSI_8: CGKeyCode = 0x1C;
}

/// Virtual key codes that count as `key` being held
fn key_codes(key: Key) -> &'static [CGKeyCode] {
    match key {
        Key::Control => &[vk::CONTROL, vk::RIGHT_CONTROL],
        Key::Shift => &[vk::SHIFT, vk::RIGHT_SHIFT],
        Key::F1 => &[vk::F1],
        Key::F2 => &[vk::F2],
        Key::F3 => &[vk::F3],
        Key::F4 => &[vk::F4],
        Key::F5 => &[vk::F5],
        Key::F6 => &[vk::F6],
        Key::F7 => &[vk::F7],
        Key::F8 => &[vk::F8],
        Key::F9 => &[vk::F9],
        Key::Digit1 => &[vk::ANSI_1],
        Key::Digit2 => &[vk::ANSI_2],
        Key::Digit3 => &[vk::ANSI_3],
        Key::Digit4 => &[vk::ANSI_4],
        Key::Digit5 => &[vk::ANSI_5],
        Key::Digit6 => &[vk::ANSI_6],
        Key::Digit7 => &[vk::ANSI_7],
        Key::Digit8 => &[vk::ANSI_8],
    }
}

/// Polls physical key state through `CGEventSourceKeyState`
#[derive(Default)]
pub struct MacKeyState {
    _private: (),
}

impl MacKeyState {
    pub fn new() -> Self {
        debug!("using CoreGraphics combined session key state");
        Self::default()
    }
}

impl KeyState for MacKeyState {
    fn is_pressed(&self, key: Key) -> bool {
        key_codes(key)
            .iter()
            // SAFETY: CGEventSourceKeyState only reads global input state
            // and accepts any key code.
            .any(|&code| unsafe {
                CGEventSourceKeyState(CGEventSourceStateID::CombinedSessionState, code)
            })
    }
}
