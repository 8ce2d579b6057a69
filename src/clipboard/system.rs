//! Clipboard backend built on arboard

use tracing::debug;

use super::{Clipboard, ClipboardError};

/// System clipboard via arboard.
///
/// The handle is opened on first use and dropped after any failure, so a
/// retry reconnects instead of reusing a broken connection.
#[derive(Default)]
pub struct ArboardClipboard {
    handle: Option<arboard::Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.handle.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(unavailable)?;
            debug!("clipboard connection opened");
            self.handle = Some(clipboard);
        }

        self.handle
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("no clipboard handle".to_string()))
    }

    /// Drop the handle if `result` failed so the next call reconnects
    fn settle<T>(&mut self, result: Result<T, ClipboardError>) -> Result<T, ClipboardError> {
        if result.is_err() && self.handle.take().is_some() {
            debug!("clipboard connection dropped after failure");
        }
        result
    }
}

impl Clipboard for ArboardClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        let result = self.handle().and_then(|handle| read_result(handle.get_text()));
        self.settle(result)
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        let result = self
            .handle()
            .and_then(|handle| handle.set_text(text).map_err(write_error));
        self.settle(result)
    }
}

fn unavailable(err: arboard::Error) -> ClipboardError {
    ClipboardError::Unavailable(err.to_string())
}

/// Map an arboard read; an empty or non-text clipboard reads as `""`
fn read_result(result: Result<String, arboard::Error>) -> Result<String, ClipboardError> {
    match result {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
        Err(e) => Err(ClipboardError::Read(e.to_string())),
    }
}

fn write_error(err: arboard::Error) -> ClipboardError {
    ClipboardError::Write(err.to_string())
}
