//! Presentation port for the paste popup.

use anyhow::Result;

use crate::clipboard::ClipboardEntry;
use crate::settings::model::Theme;

/// Shown in place of the list when the history is empty.
pub const EMPTY_HISTORY_PLACEHOLDER: &str = "(No copied items yet)";

/// Everything a presentation layer needs to draw the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub entries: Vec<ClipboardEntry>,
    pub theme: Theme,
}

impl PopupView {
    pub fn new(entries: Vec<ClipboardEntry>, theme: Theme) -> Self {
        Self { entries, theme }
    }

    /// One display line per entry, most recent first, or the placeholder.
    pub fn lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![EMPTY_HISTORY_PLACEHOLDER.to_string()];
        }
        self.entries
            .iter()
            .map(|entry| {
                if entry.timestamp.is_empty() {
                    entry.text.clone()
                } else {
                    format!("[{}] {}", entry.timestamp, entry.text)
                }
            })
            .collect()
    }
}

#[async_trait::async_trait]
pub trait UiPort: Send + Sync {
    async fn show_popup(&self, view: &PopupView) -> Result<()>;

    /// Redraw an already visible popup after the history or theme changed.
    async fn refresh_popup(&self, view: &PopupView) -> Result<()>;

    async fn hide_popup(&self) -> Result<()>;
}
