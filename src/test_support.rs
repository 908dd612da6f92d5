//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::clipboard::{ClipboardError, ClipboardSink};
use crate::core::state::App;
use crate::core::transcript::{ShareError, ShareSurface};

/// Creates a test App with catalog defaults.
pub fn test_app() -> App {
    App::new()
}

/// Clipboard that records every write.
#[derive(Default)]
pub struct RecordingClipboard {
    pub writes: Vec<String>,
}

impl ClipboardSink for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.push(text.to_string());
        Ok(())
    }
}

/// Clipboard that always fails, like a headless session.
pub struct FailingClipboard;

impl ClipboardSink for FailingClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no display".to_string()))
    }
}

/// Share surface that either accepts (recording title and text) or
/// returns a fixed error.
pub struct FakeShare {
    pub shared: Vec<(String, String)>,
    error: Option<ShareError>,
}

impl FakeShare {
    pub fn succeeding() -> Self {
        Self {
            shared: Vec::new(),
            error: None,
        }
    }

    /// The user dismissed the share sheet.
    pub fn rejecting() -> Self {
        Self {
            shared: Vec::new(),
            error: Some(ShareError::Cancelled),
        }
    }

    /// The platform could not show the share sheet at all.
    pub fn failing(reason: &str) -> Self {
        Self {
            shared: Vec::new(),
            error: Some(ShareError::Failed(reason.to_string())),
        }
    }
}

impl ShareSurface for FakeShare {
    fn share(&mut self, title: &str, text: &str) -> Result<(), ShareError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        self.shared.push((title.to_string(), text.to_string()));
        Ok(())
    }
}
