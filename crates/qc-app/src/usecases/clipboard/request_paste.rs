use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info_span, Instrument};

use qc_core::ports::{PasteInjectorPort, SystemClipboardPort};

/// Put a history entry on the OS clipboard, then synthesize a paste into
/// the previously focused application after `delay`.
///
/// The deferred paste runs on its own task: it is neither cancellable nor
/// coalesced, and dismissing the popup does not affect it.
pub struct RequestPaste {
    clipboard: Arc<dyn SystemClipboardPort>,
    injector: Arc<dyn PasteInjectorPort>,
    delay: Duration,
}

impl RequestPaste {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        injector: Arc<dyn PasteInjectorPort>,
        delay: Duration,
    ) -> Self {
        Self {
            clipboard,
            injector,
            delay,
        }
    }

    /// Errors only if the clipboard could not be set; nothing is injected
    /// then. Injection failures are logged by the returned task.
    pub async fn execute(&self, text: &str) -> Result<JoinHandle<()>> {
        let clipboard = Arc::clone(&self.clipboard);
        let text = text.to_string();
        tokio::task::spawn_blocking(move || clipboard.write_text(&text))
            .await
            .context("clipboard write task failed")?
            .context("Failed to set clipboard for paste")?;

        let injector = Arc::clone(&self.injector);
        let delay = self.delay;
        let span = info_span!("usecase.request_paste.inject", delay_ms = delay.as_millis() as u64);

        Ok(tokio::spawn(
            async move {
                tokio::time::sleep(delay).await;
                match tokio::task::spawn_blocking(move || injector.inject_paste()).await {
                    Ok(Ok(())) => debug!("Deferred paste delivered"),
                    Ok(Err(err)) => error!(error = %err, "Paste injection failed"),
                    Err(err) => error!(error = %err, "Paste injection task failed"),
                }
            }
            .instrument(span),
        ))
    }
}
