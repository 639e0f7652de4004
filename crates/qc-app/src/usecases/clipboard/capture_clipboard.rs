use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};

use qc_core::clipboard::format_display_timestamp;
use qc_core::ports::{ClipboardChangeHandler, ClockPort};
use qc_core::{CaptureOutcome, ClipboardEntry};

use crate::history_store::HistoryStore;

/// Records newly observed clipboard text at the front of the history,
/// stamped with the local capture time.
pub struct CaptureClipboard {
    store: Arc<HistoryStore>,
    clock: Arc<dyn ClockPort>,
}

impl CaptureClipboard {
    pub fn new(store: Arc<HistoryStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(&self, text: String) -> CaptureOutcome {
        let span = info_span!("usecase.capture_clipboard.execute", chars = text.chars().count());

        async {
            if text.is_empty() {
                return CaptureOutcome::Empty;
            }
            if self.store.contains_equivalent(&text).await {
                debug!("Clipboard text already in history");
                return CaptureOutcome::Duplicate;
            }

            let timestamp = format_display_timestamp(self.clock.now_ms());
            let outcome = self.store.insert(ClipboardEntry::new(text, timestamp)).await;
            if outcome.is_inserted() {
                info!("Captured clipboard entry");
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

#[async_trait::async_trait]
impl ClipboardChangeHandler for CaptureClipboard {
    async fn on_clipboard_changed(&self, text: String) -> Result<CaptureOutcome> {
        Ok(self.execute(text).await)
    }
}
