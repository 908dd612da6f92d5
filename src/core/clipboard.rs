//! System clipboard access behind a small trait so tests can swap in a fake.

use std::fmt;

use log::debug;

#[derive(Debug)]
pub enum ClipboardError {
    Unavailable(String),
    Write(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(e) => write!(f, "clipboard unavailable: {e}"),
            ClipboardError::Write(e) => write!(f, "failed to set clipboard text: {e}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard via `arboard`. A handle is opened per write, since
/// headless sessions may have no clipboard at all.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
