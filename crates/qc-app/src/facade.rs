//! The calls a presentation layer makes into the core.

use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;

use qc_core::ports::PopupView;
use qc_core::{ClipboardEntry, EntryId, HistoryError, Theme};

use crate::history_store::HistoryStore;
use crate::usecases::{ListHistory, RequestPaste, ThemeState, UpdateHistoryEntry};

pub struct ClipboardFacade {
    list_history: ListHistory,
    update_entry: UpdateHistoryEntry,
    request_paste: RequestPaste,
    theme: Arc<ThemeState>,
}

impl ClipboardFacade {
    pub fn new(store: Arc<HistoryStore>, request_paste: RequestPaste, theme: Arc<ThemeState>) -> Self {
        Self {
            list_history: ListHistory::new(store.clone()),
            update_entry: UpdateHistoryEntry::new(store),
            request_paste,
            theme,
        }
    }

    pub async fn get_history(&self) -> Vec<ClipboardEntry> {
        self.list_history.execute().await
    }

    pub async fn update_entry(&self, old_text: &str, new_text: &str) -> Result<(), HistoryError> {
        self.update_entry.execute(old_text, new_text).await
    }

    pub async fn update_entry_by_id(&self, id: &EntryId, new_text: &str) -> Result<(), HistoryError> {
        self.update_entry.execute_by_id(id, new_text).await
    }

    pub async fn request_paste(&self, text: &str) -> Result<JoinHandle<()>> {
        self.request_paste.execute(text).await
    }

    pub async fn get_theme(&self) -> Theme {
        self.theme.get().await
    }

    pub async fn set_theme(&self, theme: Theme) -> Theme {
        self.theme.set(theme).await
    }

    pub async fn toggle_theme(&self) -> Theme {
        self.theme.toggle().await
    }

    /// Current history and theme, ready to render. Never mutates history.
    pub async fn popup_view(&self) -> PopupView {
        PopupView::new(self.get_history().await, self.get_theme().await)
    }
}
