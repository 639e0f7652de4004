use anyhow::{anyhow, Result};

use qc_platform::ipc::PlatformCommand;
use qc_platform::runtime::PlatformCommandSender;

/// Cloneable, `Send` handle for driving the runtime from other tasks or
/// threads, e.g. a presentation layer or a signal handler.
#[derive(Clone)]
pub struct AppRuntimeHandle {
    command_tx: PlatformCommandSender,
}

impl AppRuntimeHandle {
    pub(crate) fn new(command_tx: PlatformCommandSender) -> Self {
        Self { command_tx }
    }

    async fn send(&self, command: PlatformCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|err| anyhow!("runtime is no longer running: {err}"))
    }

    pub async fn show_popup(&self) -> Result<()> {
        self.send(PlatformCommand::ShowPopup).await
    }

    pub async fn hide_popup(&self) -> Result<()> {
        self.send(PlatformCommand::HidePopup).await
    }

    /// Hide the popup and paste `text` into the previously focused window.
    pub async fn paste(&self, text: impl Into<String>) -> Result<()> {
        self.send(PlatformCommand::Paste { text: text.into() }).await
    }

    pub async fn toggle_theme(&self) -> Result<()> {
        self.send(PlatformCommand::ToggleTheme).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(PlatformCommand::Shutdown).await
    }

    /// [`Self::shutdown`] for threads outside the async runtime, such as the
    /// platform event loop. Must not be called from async code.
    pub fn blocking_shutdown(&self) -> Result<()> {
        self.command_tx
            .blocking_send(PlatformCommand::Shutdown)
            .map_err(|err| anyhow!("runtime is no longer running: {err}"))
    }
}
