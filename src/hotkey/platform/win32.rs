//! Key-state polling via `GetAsyncKeyState`
//!
//! The high bit of the returned state is set while the key is down. The
//! generic `VK_CONTROL`/`VK_SHIFT` codes cover both left and right keys.

use tracing::debug;
use ::windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;

use crate::hotkey::keys::{Key, KeyState};

/// Win32 virtual key codes
mod vk {
    pub const SHIFT: u16 = 0x10;
    pub const CONTROL: u16 = 0x11;

    pub const F1: u16 = 0x70;
    pub const F2: u16 = 0x71;
    pub const F3: u16 = 0x72;
    pub const F4: u16 = 0x73;
    pub const F5: u16 = 0x74;
    pub const F6: u16 = 0x75;
    pub const F7: u16 = 0x76;
    pub const F8: u16 = 0x77;
    pub const F9: u16 = 0x78;

    pub const DIGIT_1: u16 = 0x31;
    pub const DIGIT_2: u16 = 0x32;
    pub const DIGIT_3: u16 = 0x33;
    pub const DIGIT_4: u16 = 0x34;
    pub const DIGIT_5: u16 = 0x35;
    pub const DIGIT_6: u16 = 0x36;
    pub const DIGIT_7: u16 = 0x37;
    pub const DIGIT_8: u16 = 0x38;
}

/// Bit set in the `GetAsyncKeyState` result while the key is held
const KEY_DOWN_MASK: u16 = 0x8000;

fn key_code(key: Key) -> u16 {
    match key {
        Key::Control => vk::CONTROL,
        Key::Shift => vk::SHIFT,
        Key::F1 => vk::F1,
        Key::F2 => vk::F2,
        Key::F3 => vk::F3,
        Key::F4 => vk::F4,
        Key::F5 => vk::F5,
        Key::F6 => vk::F6,
        Key::F7 => vk::F7,
        Key::F8 => vk::F8,
        Key::F9 => vk::F9,
        Key::Digit1 => vk::DIGIT_1,
        Key::Digit2 => vk::DIGIT_2,
        Key::Digit3 => vk::DIGIT_3,
        Key::Digit4 => vk::DIGIT_4,
        Key::Digit5 => vk::DIGIT_5,
        Key::Digit6 => vk::DIGIT_6,
        Key::Digit7 => vk::DIGIT_7,
        Key::Digit8 => vk::DIGIT_8,
    }
}

/// Whether a raw `GetAsyncKeyState` result reports the key as held
fn is_down(state: i16) -> bool {
    (state as u16) & KEY_DOWN_MASK != 0
}

/// Polls physical key state through `GetAsyncKeyState`
#[derive(Default)]
pub struct WindowsKeyState {
    _private: (),
}

impl WindowsKeyState {
    pub fn new() -> Self {
        debug!("using Win32 async key state");
        Self::default()
    }
}

impl KeyState for WindowsKeyState {
    fn is_pressed(&self, key: Key) -> bool {
        // SAFETY: GetAsyncKeyState only reads global input state and
        // returns 0 for codes it does not recognize.
        let state = unsafe { GetAsyncKeyState(key_code(key) as i32) };
        is_down(state)
    }
}
