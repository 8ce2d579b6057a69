//! System clipboard access
//!
//! The dispatcher only sees the `Clipboard` trait. `ArboardClipboard` is
//! the real backend; tests substitute scripted doubles.

mod system;

pub use system::ArboardClipboard;

/// Errors reported by a clipboard backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read clipboard: {0}")]
    Read(String),

    #[error("failed to write clipboard: {0}")]
    Write(String),
}

/// Text clipboard service.
///
/// Either call may fail transiently; callers are expected to retry.
/// An empty clipboard reads as an empty string, not as an error.
pub trait Clipboard {
    fn read(&mut self) -> Result<String, ClipboardError>;

    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}
