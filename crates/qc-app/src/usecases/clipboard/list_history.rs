use std::sync::Arc;

use qc_core::ClipboardEntry;

use crate::history_store::HistoryStore;

/// Read-only snapshot of the history for rendering, most recent first.
pub struct ListHistory {
    store: Arc<HistoryStore>,
}

impl ListHistory {
    pub fn new(store: Arc<HistoryStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Vec<ClipboardEntry> {
        self.store.snapshot().await
    }
}
