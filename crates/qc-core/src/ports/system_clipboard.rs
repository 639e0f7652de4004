//! System clipboard port
//!
//! Text-only access to the OS clipboard. Non-text content reads as `None`.

use anyhow::Result;

pub trait SystemClipboardPort: Send + Sync {
    /// Current clipboard text, or `None` when the clipboard holds no text.
    fn read_text(&self) -> Result<Option<String>>;

    fn write_text(&self, text: &str) -> Result<()>;
}
