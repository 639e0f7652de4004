//! Clipboard change handler port
//!
//! The platform watcher reads the clipboard and hands new text to this
//! handler; the app layer implements it and decides whether to record it.

use anyhow::Result;

use crate::clipboard::CaptureOutcome;

#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    /// Called with raw clipboard text the watcher has not seen on its
    /// previous tick.
    async fn on_clipboard_changed(&self, text: String) -> Result<CaptureOutcome>;
}
