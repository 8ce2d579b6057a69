//! Platform key-state backends

#[cfg(target_os = "macos")]
mod macos;
#[cfg(windows)]
mod win32;

use super::keys::KeyState;

/// Errors that can occur while setting up key-state polling
#[derive(Debug, thiserror::Error)]
#[cfg_attr(any(target_os = "macos", windows), allow(dead_code))]
pub enum HotkeyError {
    #[error("no key-state backend is available for this platform")]
    Unsupported,
}

/// Key-state backend for the current platform
#[cfg(target_os = "macos")]
pub fn default_key_state() -> Result<Box<dyn KeyState>, HotkeyError> {
    Ok(Box::new(macos::MacKeyState::new()))
}

/// Key-state backend for the current platform
#[cfg(windows)]
pub fn default_key_state() -> Result<Box<dyn KeyState>, HotkeyError> {
    Ok(Box::new(win32::WindowsKeyState::new()))
}

/// Key-state backend for the current platform
#[cfg(not(any(target_os = "macos", windows)))]
pub fn default_key_state() -> Result<Box<dyn KeyState>, HotkeyError> {
    Err(HotkeyError::Unsupported)
}
