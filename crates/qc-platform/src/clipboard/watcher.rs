//! Clipboard watcher
//!
//! A periodic poll task that reads the OS clipboard text and hands changes
//! to a [`ClipboardChangeHandler`]. The watcher owns only the transient
//! "last seen" text; whether something is recorded is the handler's call.
//!
//! ```text
//! SystemClipboardPort ──read──> ClipboardWatcher ──text──> ClipboardChangeHandler
//!                                      │
//!                                      └── PlatformEvent::HistoryChanged (on insert)
//! ```
//!
//! Unchanged text is skipped once the watcher is primed. The first tick
//! after start always goes through the handler, so a clipboard that already
//! held text at launch is still recorded if the history lacks it.
//! Read failures and handler errors never stop the loop.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use qc_core::ports::{ClipboardChangeHandler, SystemClipboardPort};
use qc_core::CaptureOutcome;

use crate::ipc::PlatformEvent;
use crate::runtime::PlatformEventSender;

/// Read failures are logged on the first occurrence and then once per this
/// many consecutive failures.
const READ_FAILURE_LOG_EVERY: u64 = 50;

#[derive(Debug, Default)]
struct WatchState {
    last_seen: Option<String>,
    primed: bool,
    consecutive_read_failures: u64,
}

pub struct ClipboardWatcher {
    clipboard: Arc<dyn SystemClipboardPort>,
    handler: Arc<dyn ClipboardChangeHandler>,
    event_tx: PlatformEventSender,
    state: Mutex<WatchState>,
}

impl ClipboardWatcher {
    /// `seed` is the initial "last seen" text.
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        handler: Arc<dyn ClipboardChangeHandler>,
        event_tx: PlatformEventSender,
        seed: Option<String>,
    ) -> Self {
        Self {
            clipboard,
            handler,
            event_tx,
            state: Mutex::new(WatchState {
                last_seen: seed,
                ..WatchState::default()
            }),
        }
    }

    pub async fn last_seen(&self) -> Option<String> {
        self.state.lock().await.last_seen.clone()
    }

    /// Run a single poll tick.
    ///
    /// Returns `None` when nothing was handed to the handler: the clipboard
    /// had no text or the text was unchanged since the previous tick.
    pub async fn check_once(&self) -> Result<Option<CaptureOutcome>> {
        let clipboard = Arc::clone(&self.clipboard);
        let text = tokio::task::spawn_blocking(move || clipboard.read_text())
            .await
            .context("clipboard read task failed")??;

        let Some(text) = text else {
            return Ok(None);
        };

        {
            let mut state = self.state.lock().await;
            let unchanged = state.last_seen.as_deref() == Some(text.as_str());
            state.last_seen = Some(text.clone());
            if state.primed && unchanged {
                return Ok(None);
            }
            state.primed = true;
        }

        let outcome = self.handler.on_clipboard_changed(text).await?;
        if outcome.is_inserted() {
            if let Err(err) = self.event_tx.try_send(PlatformEvent::HistoryChanged) {
                warn!(error = %err, "Failed to emit history changed event");
            }
        }
        Ok(Some(outcome))
    }

    /// Tick until `cancel` fires. Ticks that overrun the interval are
    /// delayed rather than bunched up.
    pub fn spawn(self: Arc<Self>, interval: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            info!(interval_ms = interval.as_millis() as u64, "Clipboard watcher started");

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => self.tick().await,
                }
            }

            info!("Clipboard watcher stopped");
        })
    }

    async fn tick(&self) {
        match self.check_once().await {
            Ok(outcome) => {
                let mut state = self.state.lock().await;
                if state.consecutive_read_failures > 0 {
                    debug!(
                        failures = state.consecutive_read_failures,
                        "Clipboard reads recovered"
                    );
                    state.consecutive_read_failures = 0;
                }
                if let Some(outcome) = outcome {
                    debug!(?outcome, "Clipboard change handled");
                }
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.consecutive_read_failures += 1;
                let failures = state.consecutive_read_failures;
                if failures == 1 || failures % READ_FAILURE_LOG_EVERY == 0 {
                    warn!(error = %err, failures, "Clipboard poll tick failed");
                }
            }
        }
    }
}
