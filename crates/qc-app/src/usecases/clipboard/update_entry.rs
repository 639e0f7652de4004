use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

use qc_core::{EntryId, HistoryError};

use crate::history_store::HistoryStore;

/// Edit workflow: replace an entry's text in place, keeping its position,
/// id and timestamp.
pub struct UpdateHistoryEntry {
    store: Arc<HistoryStore>,
}

impl UpdateHistoryEntry {
    pub fn new(store: Arc<HistoryStore>) -> Self {
        Self { store }
    }

    /// Locate the entry by the literal text currently on screen.
    pub async fn execute(&self, old_text: &str, new_text: &str) -> Result<(), HistoryError> {
        let span = info_span!("usecase.update_entry.execute");

        async {
            match self.store.update(old_text, new_text).await {
                Ok(index) => {
                    info!(index, "History entry updated");
                    Ok(())
                }
                Err(err) => {
                    warn!(error = %err, "History entry update rejected");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    pub async fn execute_by_id(&self, id: &EntryId, new_text: &str) -> Result<(), HistoryError> {
        let span = info_span!("usecase.update_entry.execute_by_id", entry_id = %id);

        async {
            match self.store.update_by_id(id, new_text).await {
                Ok(index) => {
                    info!(index, "History entry updated");
                    Ok(())
                }
                Err(err) => {
                    warn!(error = %err, "History entry update rejected");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
