use anyhow::Result;
use tracing::info;

use qc_core::ports::{PopupView, UiPort};

/// Headless presentation: the popup is written to the log.
#[derive(Debug, Default)]
pub struct LoggingUi;

impl LoggingUi {
    fn render(view: &PopupView) {
        for (index, line) in view.lines().iter().enumerate() {
            info!(target: "quickclip::popup", theme = %view.theme, index, "{line}");
        }
    }
}

#[async_trait::async_trait]
impl UiPort for LoggingUi {
    async fn show_popup(&self, view: &PopupView) -> Result<()> {
        info!(target: "quickclip::popup", entries = view.entries.len(), "Popup shown");
        Self::render(view);
        Ok(())
    }

    async fn refresh_popup(&self, view: &PopupView) -> Result<()> {
        info!(target: "quickclip::popup", entries = view.entries.len(), "Popup refreshed");
        Self::render(view);
        Ok(())
    }

    async fn hide_popup(&self) -> Result<()> {
        info!(target: "quickclip::popup", "Popup hidden");
        Ok(())
    }
}
