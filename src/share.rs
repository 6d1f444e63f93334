//! Clipboard and share collaborators. The UI only sees the two traits, which
//! keeps key handling testable without a desktop session.

use std::io;

use arboard::Clipboard;
use thiserror::Error;

/// Subject line used when the config does not provide one.
pub const DEFAULT_SHARE_SUBJECT: &str = "Quote from QuoteSpark";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("failed to open share target")]
    Launch(#[source] io::Error),
}

/// Receives formatted quote text for the clipboard.
pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str) -> Result<(), ShareError>;
}

/// Receives formatted quote text for sharing.
pub trait ShareSink {
    fn share_text(&mut self, text: &str) -> Result<(), ShareError>;
}

/// System clipboard via `arboard`. The handle is opened on first use so a
/// session without a display server only fails when the user copies.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ShareError> {
        let opened = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(|e| ShareError::Clipboard(e.to_string()))?,
        };
        let clipboard = self.clipboard.insert(opened);

        clipboard
            .set_text(text.to_string())
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }
}

/// Shares through the default mail client, the closest thing a terminal has
/// to a share sheet.
#[derive(Debug, Clone)]
pub struct MailShare {
    subject: String,
}

impl MailShare {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl Default for MailShare {
    fn default() -> Self {
        Self::new(DEFAULT_SHARE_SUBJECT)
    }
}

impl ShareSink for MailShare {
    fn share_text(&mut self, text: &str) -> Result<(), ShareError> {
        let url = share_url(&self.subject, text);
        tracing::debug!(%url, "launching share target");
        open::that(&url).map_err(ShareError::Launch)
    }
}

/// Build the `mailto:` link for a quote.
pub fn share_url(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
