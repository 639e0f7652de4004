//! # Dependency injection
//!
//! The only place that depends on qc-infra, qc-platform and qc-app at the
//! same time. Assembly only: no business decisions are made here.

use std::sync::Arc;

use tracing::debug;

use qc_app::usecases::{CaptureClipboard, RequestPaste, ThemeState};
use qc_app::{AppPaths, ClipboardFacade, HistoryStore, PersistencePolicy};
use qc_core::config::AppConfig;
use qc_core::ports::{HotkeyAction, HotkeyBinding, HotkeyPort, SystemClipboardPort, UiPort};
use qc_infra::{FileHistoryRepository, FileSettingsRepository, SystemClock};
use qc_platform::clipboard::{ClipboardWatcher, LocalClipboard};
use qc_platform::runtime::{PlatformEventReceiver, PlatformEventSender};
use qc_platform::EnigoPasteInjector;

use crate::runtime::{AppRuntime, AppRuntimeParts};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),
}

pub fn hotkey_bindings(config: &AppConfig) -> Vec<HotkeyBinding> {
    vec![
        HotkeyBinding::new(HotkeyAction::PastePopup, config.hotkeys.paste_popup.clone()),
        HotkeyBinding::new(HotkeyAction::Copy, config.hotkeys.copy.clone()),
    ]
}

/// Initial "last seen" text: the live clipboard, else the newest history
/// entry, else empty.
async fn watcher_seed(clipboard: &dyn SystemClipboardPort, store: &HistoryStore) -> String {
    match clipboard.read_text() {
        Ok(Some(text)) => return text,
        Ok(None) => {}
        Err(err) => debug!(error = %err, "Clipboard unreadable at startup"),
    }
    store.newest_text().await.unwrap_or_default()
}

/// The platform event bus plus the hotkey backend feeding it. Built by the
/// caller because the backend lives on the main thread's event loop.
pub struct PlatformWiring {
    pub event_tx: PlatformEventSender,
    pub event_rx: PlatformEventReceiver,
    /// `None` when no hotkey backend could be created.
    pub hotkeys: Option<Box<dyn HotkeyPort>>,
}

/// Build the runtime with the OS adapters and file-backed storage.
pub async fn wire_runtime(
    config: &AppConfig,
    paths: &AppPaths,
    ui: Arc<dyn UiPort>,
    platform: PlatformWiring,
) -> WiringResult<AppRuntime> {
    let PlatformWiring {
        event_tx,
        event_rx,
        hotkeys,
    } = platform;

    let clipboard: Arc<dyn SystemClipboardPort> = Arc::new(
        LocalClipboard::new().map_err(|e| WiringError::ClipboardInit(format!("{e:#}")))?,
    );

    let policy = PersistencePolicy::from(&config.history);
    let store = Arc::new(
        HistoryStore::open(
            Arc::new(FileHistoryRepository::new(&paths.history_path)),
            &config.history,
        )
        .await,
    );
    let theme = Arc::new(
        ThemeState::load(
            Arc::new(FileSettingsRepository::new(&paths.theme_path)),
            policy,
        )
        .await,
    );

    let request_paste = RequestPaste::new(
        Arc::clone(&clipboard),
        Arc::new(EnigoPasteInjector::new()),
        config.paste.delay(),
    );
    let facade = Arc::new(ClipboardFacade::new(
        Arc::clone(&store),
        request_paste,
        theme,
    ));

    let capture = Arc::new(CaptureClipboard::new(
        Arc::clone(&store),
        Arc::new(SystemClock),
    ));
    let seed = watcher_seed(clipboard.as_ref(), &store).await;
    let watcher = Arc::new(ClipboardWatcher::new(
        clipboard,
        capture,
        event_tx,
        Some(seed),
    ));

    Ok(AppRuntime::new(AppRuntimeParts {
        facade,
        ui,
        watcher,
        hotkeys,
        bindings: hotkey_bindings(config),
        poll_interval: config.watcher.poll_interval(),
        event_rx,
    }))
}
