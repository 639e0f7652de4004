use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use std::sync::{Arc, Mutex};

use qc_core::ports::SystemClipboardPort;

/// OS clipboard backed by `clipboard-rs`. Text only.
pub struct LocalClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

impl LocalClipboard {
    pub fn new() -> Result<Self> {
        let context = map_clipboard_err(ClipboardContext::new())
            .map_err(|e| e.context("ClipboardContext::new failed"))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

impl SystemClipboardPort for LocalClipboard {
    fn read_text(&self) -> Result<Option<String>> {
        let ctx = self
            .inner
            .lock()
            .map_err(|_| anyhow!("clipboard context lock poisoned"))?;

        if !ctx.has(ContentFormat::Text) {
            return Ok(None);
        }
        map_clipboard_err(ctx.get_text()).map(Some)
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let ctx = self
            .inner
            .lock()
            .map_err(|_| anyhow!("clipboard context lock poisoned"))?;

        map_clipboard_err(ctx.set_text(text.to_string()))
    }
}
