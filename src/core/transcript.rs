//! # Transcript Export and Share
//!
//! Both operate on a snapshot of the message list and hold no state.
//!
//! - Export writes `{ "timestamp", "messages" }` as pretty JSON to
//!   `intellisync-chat-<epoch-millis>.json`, atomically (`.tmp` + rename).
//! - Share hands a flattened `role: content` transcript to the platform's
//!   share surface, falling back to the clipboard when there is none or it
//!   fails. The fallback is silent.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::clipboard::ClipboardSink;
use crate::core::message::ChatMessage;

pub const SHARE_TITLE: &str = "IntelliSync Chat";

/// On-disk shape of an exported transcript.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TranscriptExport {
    /// ISO-8601 export time.
    pub timestamp: String,
    pub messages: Vec<ChatMessage>,
}

impl TranscriptExport {
    pub fn new(messages: &[ChatMessage], now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            messages: messages.to_vec(),
        }
    }
}

pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("intellisync-chat-{}.json", now.timestamp_millis())
}

/// Write the transcript into `dir` and return the path of the new file.
pub fn export_transcript(
    messages: &[ChatMessage],
    dir: &Path,
    now: DateTime<Utc>,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now));
    let export = TranscriptExport::new(messages, now);
    atomic_write_json(&path, &export)?;
    info!("Exported {} messages to {}", messages.len(), path.display());
    Ok(path)
}

fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// `role: content` per message, separated by a blank line.
pub fn share_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShareError {
    Cancelled,
    Failed(String),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::Cancelled => write!(f, "share cancelled"),
            ShareError::Failed(e) => write!(f, "share failed: {e}"),
        }
    }
}

impl std::error::Error for ShareError {}

/// A native "share" sheet, where the platform has one.
pub trait ShareSurface {
    fn share(&mut self, title: &str, text: &str) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    CopiedToClipboard,
    /// Both the share surface and the clipboard were unusable.
    Dropped,
}

pub fn share_transcript(
    messages: &[ChatMessage],
    surface: Option<&mut dyn ShareSurface>,
    clipboard: &mut dyn ClipboardSink,
) -> ShareOutcome {
    let text = share_text(messages);

    match surface {
        Some(surface) => match surface.share(SHARE_TITLE, &text) {
            Ok(()) => return ShareOutcome::Shared,
            Err(e) => debug!("Share surface rejected transcript ({e}), falling back to clipboard"),
        },
        None => debug!("No share surface, falling back to clipboard"),
    }

    match clipboard.write_text(&text) {
        Ok(()) => ShareOutcome::CopiedToClipboard,
        Err(e) => {
            warn!("Transcript share fallback failed: {e}");
            ShareOutcome::Dropped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;
    use crate::core::state::SessionState;
    use crate::test_support::{FailingClipboard, FakeShare, RecordingClipboard};

    fn three_messages() -> Vec<ChatMessage> {
        let mut session = SessionState::new();
        session.add_message(Role::User, "What is Rust?");
        session.add_message(Role::Assistant, "A systems language.");
        session.add_message(Role::User, "Thanks");
        session.messages().to_vec()
    }

    #[test]
    fn test_export_three_messages() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        let path = export_transcript(&three_messages(), dir.path(), now).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("intellisync-chat-{}.json", now.timestamp_millis())
        );

        let json = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["messages"].as_array().unwrap().len(), 3);
        assert_eq!(value["messages"][1]["role"], "assistant");
        let ts = value["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
        assert!(ts.ends_with('Z'));

        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_export_uses_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_transcript(&three_messages(), dir.path(), Utc::now()).unwrap();
        let json = fs::read_to_string(path).unwrap();
        assert!(json.contains("\n  \"timestamp\""));
    }

    #[test]
    fn test_export_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = export_transcript(&three_messages(), &nested, Utc::now()).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn test_share_text_format() {
        assert_eq!(
            share_text(&three_messages()),
            "user: What is Rust?\n\nassistant: A systems language.\n\nuser: Thanks"
        );
        assert_eq!(share_text(&[]), "");
    }

    #[test]
    fn test_share_uses_surface_when_available() {
        let mut surface = FakeShare::succeeding();
        let mut clipboard = RecordingClipboard::default();
        let outcome = share_transcript(&three_messages(), Some(&mut surface), &mut clipboard);

        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(surface.shared.len(), 1);
        assert_eq!(surface.shared[0].0, SHARE_TITLE);
        assert!(clipboard.writes.is_empty());
    }

    #[test]
    fn test_share_falls_back_on_rejection() {
        let mut surface = FakeShare::rejecting();
        let mut clipboard = RecordingClipboard::default();
        let outcome = share_transcript(&three_messages(), Some(&mut surface), &mut clipboard);

        assert_eq!(outcome, ShareOutcome::CopiedToClipboard);
        assert_eq!(clipboard.writes, vec![share_text(&three_messages())]);
    }

    #[test]
    fn test_share_falls_back_when_surface_fails() {
        let mut surface = FakeShare::failing("no share target");
        let error = surface.share(SHARE_TITLE, "text").unwrap_err();
        assert_eq!(error, ShareError::Failed("no share target".to_string()));
        assert_eq!(error.to_string(), "share failed: no share target");

        let mut clipboard = RecordingClipboard::default();
        let outcome = share_transcript(&three_messages(), Some(&mut surface), &mut clipboard);
        assert_eq!(outcome, ShareOutcome::CopiedToClipboard);
        assert_eq!(clipboard.writes, vec![share_text(&three_messages())]);
        assert!(surface.shared.is_empty());

        let mut broken = FailingClipboard;
        let outcome = share_transcript(&three_messages(), Some(&mut surface), &mut broken);
        assert_eq!(outcome, ShareOutcome::Dropped);
    }

    #[test]
    fn test_share_falls_back_without_surface() {
        let mut clipboard = RecordingClipboard::default();
        let outcome = share_transcript(&three_messages(), None, &mut clipboard);
        assert_eq!(outcome, ShareOutcome::CopiedToClipboard);
        assert_eq!(clipboard.writes.len(), 1);
    }

    #[test]
    fn test_share_clipboard_failure_is_swallowed() {
        let outcome = share_transcript(&three_messages(), None, &mut FailingClipboard);
        assert_eq!(outcome, ShareOutcome::Dropped);
    }
}
