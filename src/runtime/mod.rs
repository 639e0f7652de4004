//! The long-lived service object.
//!
//! [`AppRuntime`] owns the poll task, the hotkey registrations and the
//! presentation port. All UI calls happen on its single event loop, so the
//! watcher task and hotkey thread only ever send events to it.
//!
//! The popup grab is lifted while a paste is in flight. Otherwise the
//! synthetic paste keystroke would hit the grab and reopen the popup.

mod handle;

pub use handle::AppRuntimeHandle;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use qc_app::ClipboardFacade;
use qc_core::ports::{HotkeyAction, HotkeyBinding, HotkeyPort, UiPort};
use qc_platform::clipboard::ClipboardWatcher;
use qc_platform::ipc::{PlatformCommand, PlatformEvent};
use qc_platform::runtime::{
    command_channel, PlatformCommandReceiver, PlatformCommandSender, PlatformEventReceiver,
};

/// Everything the runtime takes ownership of.
pub struct AppRuntimeParts {
    pub facade: Arc<ClipboardFacade>,
    pub ui: Arc<dyn UiPort>,
    pub watcher: Arc<ClipboardWatcher>,
    /// `None` when no hotkey backend could be created; capture still runs.
    pub hotkeys: Option<Box<dyn HotkeyPort>>,
    pub bindings: Vec<HotkeyBinding>,
    pub poll_interval: Duration,
    pub event_rx: PlatformEventReceiver,
}

pub struct AppRuntime {
    facade: Arc<ClipboardFacade>,
    ui: Arc<dyn UiPort>,
    watcher: Arc<ClipboardWatcher>,
    hotkeys: Option<Box<dyn HotkeyPort>>,
    bindings: Vec<HotkeyBinding>,
    poll_interval: Duration,
    event_rx: PlatformEventReceiver,
    command_tx: PlatformCommandSender,
    command_rx: PlatformCommandReceiver,
    popup_visible: bool,
    hotkeys_registered: bool,
    pending_pastes: JoinSet<()>,
    cancel: CancellationToken,
}

impl AppRuntime {
    pub fn new(parts: AppRuntimeParts) -> Self {
        let (command_tx, command_rx) = command_channel();
        Self {
            facade: parts.facade,
            ui: parts.ui,
            watcher: parts.watcher,
            hotkeys: parts.hotkeys,
            bindings: parts.bindings,
            poll_interval: parts.poll_interval,
            event_rx: parts.event_rx,
            command_tx,
            command_rx,
            popup_visible: false,
            hotkeys_registered: false,
            pending_pastes: JoinSet::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn handle(&self) -> AppRuntimeHandle {
        AppRuntimeHandle::new(self.command_tx.clone())
    }

    pub fn facade(&self) -> Arc<ClipboardFacade> {
        Arc::clone(&self.facade)
    }

    /// Run until a shutdown command arrives, then tear down: stop the poll
    /// task, let in-flight pastes finish and release hotkeys.
    pub async fn run(mut self) -> Result<()> {
        if self.hotkeys.is_some() {
            self.register_hotkeys().await;
        } else {
            warn!("No hotkey backend, popup hotkey disabled");
        }

        let watcher_join =
            Arc::clone(&self.watcher).spawn(self.poll_interval, self.cancel.child_token());
        info!("QuickClip runtime started");

        loop {
            tokio::select! {
                Some(command) = self.command_rx.recv() => {
                    if matches!(command, PlatformCommand::Shutdown) {
                        info!("Shutdown requested");
                        break;
                    }
                    self.handle_command(command).await;
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event).await;
                }
                Some(joined) = self.pending_pastes.join_next(), if !self.pending_pastes.is_empty() => {
                    if let Err(err) = joined {
                        warn!(error = %err, "Paste task ended abnormally");
                    }
                    if self.pending_pastes.is_empty() {
                        self.resume_hotkeys().await;
                    }
                }
                else => break,
            }
        }

        self.shutdown(watcher_join).await;
        Ok(())
    }

    async fn handle_event(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::HotkeyPressed(HotkeyAction::PastePopup) => self.show_popup().await,
            PlatformEvent::HotkeyPressed(HotkeyAction::Copy) => {
                debug!("Copy hotkey observed");
            }
            PlatformEvent::HistoryChanged => {
                if self.popup_visible {
                    self.refresh_popup().await;
                }
            }
        }
    }

    async fn handle_command(&mut self, command: PlatformCommand) {
        match command {
            PlatformCommand::ShowPopup => self.show_popup().await,
            PlatformCommand::HidePopup => self.hide_popup().await,
            PlatformCommand::Paste { text } => {
                self.hide_popup().await;
                self.suspend_hotkeys().await;
                match self.facade.request_paste(&text).await {
                    Ok(task) => {
                        self.pending_pastes.spawn(async move {
                            if let Err(err) = task.await {
                                warn!(error = %err, "Paste injection task failed");
                            }
                        });
                    }
                    Err(err) => {
                        error!(error = %err, "Paste request failed");
                        if self.pending_pastes.is_empty() {
                            self.resume_hotkeys().await;
                        }
                    }
                }
            }
            PlatformCommand::ToggleTheme => {
                self.facade.toggle_theme().await;
                if self.popup_visible {
                    self.refresh_popup().await;
                }
            }
            PlatformCommand::Shutdown => {}
        }
    }

    async fn register_hotkeys(&mut self) {
        let Some(hotkeys) = self.hotkeys.as_ref() else {
            return;
        };
        match hotkeys.register(&self.bindings).await {
            Ok(()) => self.hotkeys_registered = true,
            Err(err) => {
                error!(error = %err, "Hotkey registration failed, popup hotkey disabled");
                // Drop whatever part of the set did register.
                if let Err(err) = hotkeys.unregister_all().await {
                    debug!(error = %err, "Partial hotkey registration not released");
                }
            }
        }
    }

    /// Lift the grab so the synthetic paste reaches the target window.
    async fn suspend_hotkeys(&mut self) {
        if !self.hotkeys_registered {
            return;
        }
        let Some(hotkeys) = self.hotkeys.as_ref() else {
            return;
        };
        // Cleared even on error: a half-released set is re-registered whole.
        self.hotkeys_registered = false;
        match hotkeys.unregister_all().await {
            Ok(()) => debug!("Hotkeys suspended for paste"),
            Err(err) => warn!(error = %err, "Failed to suspend hotkeys for paste"),
        }
    }

    async fn resume_hotkeys(&mut self) {
        if self.hotkeys_registered || self.cancel.is_cancelled() {
            return;
        }
        self.register_hotkeys().await;
        if self.hotkeys_registered {
            debug!("Hotkeys resumed after paste");
        }
    }

    async fn show_popup(&mut self) {
        let view = self.facade.popup_view().await;
        match self.ui.show_popup(&view).await {
            Ok(()) => self.popup_visible = true,
            Err(err) => error!(error = %err, "Failed to show popup"),
        }
    }

    async fn refresh_popup(&mut self) {
        let view = self.facade.popup_view().await;
        if let Err(err) = self.ui.refresh_popup(&view).await {
            warn!(error = %err, "Failed to refresh popup");
        }
    }

    async fn hide_popup(&mut self) {
        if !self.popup_visible {
            return;
        }
        self.popup_visible = false;
        if let Err(err) = self.ui.hide_popup().await {
            warn!(error = %err, "Failed to hide popup");
        }
    }

    async fn shutdown(&mut self, watcher_join: JoinHandle<()>) {
        self.cancel.cancel();
        if let Err(err) = watcher_join.await {
            warn!(error = %err, "Clipboard watcher task ended abnormally");
        }

        self.hide_popup().await;

        while let Some(joined) = self.pending_pastes.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "Pending paste task ended abnormally");
            }
        }

        if let Some(hotkeys) = self.hotkeys.as_ref() {
            if let Err(err) = hotkeys.unregister_all().await {
                warn!(error = %err, "Failed to release hotkeys");
            }
        }
        self.hotkeys_registered = false;
        info!("QuickClip runtime stopped");
    }
}
