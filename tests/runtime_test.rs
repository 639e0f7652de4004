//! Runtime behaviour with in-memory adapters: popup display, refresh on
//! capture, deferred paste, the popup grab around pastes and teardown.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;

use qc_app::usecases::{CaptureClipboard, RequestPaste, ThemeState};
use qc_app::{ClipboardFacade, HistoryStore, PersistencePolicy};
use qc_core::config::HistoryConfig;
use qc_core::ports::{
    ClockPort, HistoryRepositoryPort, HotkeyAction, HotkeyBinding, HotkeyError, HotkeyPort,
    PasteInjectorPort, PopupView, SettingsPort, SystemClipboardPort, UiPort,
    EMPTY_HISTORY_PLACEHOLDER,
};
use qc_core::{ClipboardEntry, Settings, Theme};
use qc_platform::clipboard::ClipboardWatcher;
use qc_platform::ipc::PlatformEvent;
use qc_platform::runtime::{event_channel, PlatformEventSender};
use quickclip::{AppRuntime, AppRuntimeHandle, AppRuntimeParts};

const WAIT_LIMIT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
enum UiCall {
    Show(Vec<String>),
    Refresh(Vec<String>),
    Hide,
}

#[derive(Default)]
struct RecordingUi {
    calls: Mutex<Vec<UiCall>>,
}

impl RecordingUi {
    fn calls(&self) -> Vec<UiCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl UiPort for RecordingUi {
    async fn show_popup(&self, view: &PopupView) -> Result<()> {
        self.calls.lock().unwrap().push(UiCall::Show(view.lines()));
        Ok(())
    }

    async fn refresh_popup(&self, view: &PopupView) -> Result<()> {
        self.calls.lock().unwrap().push(UiCall::Refresh(view.lines()));
        Ok(())
    }

    async fn hide_popup(&self) -> Result<()> {
        self.calls.lock().unwrap().push(UiCall::Hide);
        Ok(())
    }
}

#[derive(Default)]
struct MemoryClipboard(Mutex<Option<String>>);

impl MemoryClipboard {
    fn copy(&self, text: &str) {
        *self.0.lock().unwrap() = Some(text.to_string());
    }
}

impl SystemClipboardPort for MemoryClipboard {
    fn read_text(&self) -> Result<Option<String>> {
        Ok(self.0.lock().unwrap().clone())
    }

    fn write_text(&self, text: &str) -> Result<()> {
        self.copy(text);
        Ok(())
    }
}

#[derive(Default)]
struct HotkeyLog {
    registered: Vec<HotkeyBinding>,
    registrations: usize,
    /// Whether the popup combo is currently grabbed.
    active: bool,
    unregistered: bool,
}

struct FakeHotkeys {
    log: Arc<Mutex<HotkeyLog>>,
    fail: bool,
}

#[async_trait::async_trait]
impl HotkeyPort for FakeHotkeys {
    async fn register(&self, bindings: &[HotkeyBinding]) -> Result<(), HotkeyError> {
        if self.fail {
            return Err(HotkeyError::Unavailable("no display".to_string()));
        }
        let mut log = self.log.lock().unwrap();
        log.registered = bindings.to_vec();
        log.registrations += 1;
        log.active = true;
        Ok(())
    }

    async fn unregister_all(&self) -> Result<(), HotkeyError> {
        let mut log = self.log.lock().unwrap();
        log.active = false;
        log.unregistered = true;
        Ok(())
    }
}

/// Records, per injected keystroke, whether the popup grab was held at that
/// moment. A held grab would swallow the keystroke.
struct GrabAwareInjector {
    hotkeys: Arc<Mutex<HotkeyLog>>,
    grab_held: Mutex<Vec<bool>>,
}

impl GrabAwareInjector {
    fn grab_held(&self) -> Vec<bool> {
        self.grab_held.lock().unwrap().clone()
    }
}

impl PasteInjectorPort for GrabAwareInjector {
    fn inject_paste(&self) -> Result<()> {
        let active = self.hotkeys.lock().unwrap().active;
        self.grab_held.lock().unwrap().push(active);
        Ok(())
    }
}

struct NullHistoryRepo;

#[async_trait::async_trait]
impl HistoryRepositoryPort for NullHistoryRepo {
    async fn load(&self) -> Result<Vec<ClipboardEntry>> {
        Ok(Vec::new())
    }

    async fn save(&self, _entries: &[ClipboardEntry]) -> Result<()> {
        Ok(())
    }
}

struct NullSettings;

#[async_trait::async_trait]
impl SettingsPort for NullSettings {
    async fn load(&self) -> Result<Settings> {
        Ok(Settings::default())
    }

    async fn save(&self, _settings: &Settings) -> Result<()> {
        Ok(())
    }
}

struct ZeroClock;

impl ClockPort for ZeroClock {
    fn now_ms(&self) -> i64 {
        0
    }
}

struct Harness {
    runtime: AppRuntime,
    ui: Arc<RecordingUi>,
    clipboard: Arc<MemoryClipboard>,
    injector: Arc<GrabAwareInjector>,
    hotkeys: Arc<Mutex<HotkeyLog>>,
    event_tx: PlatformEventSender,
}

async fn harness(fail_hotkeys: bool) -> Harness {
    let store = Arc::new(HistoryStore::open(Arc::new(NullHistoryRepo), &HistoryConfig::default()).await);
    let theme = Arc::new(ThemeState::load(Arc::new(NullSettings), PersistencePolicy::default()).await);
    let clipboard = Arc::new(MemoryClipboard::default());
    let hotkeys = Arc::new(Mutex::new(HotkeyLog::default()));
    let injector = Arc::new(GrabAwareInjector {
        hotkeys: hotkeys.clone(),
        grab_held: Mutex::new(Vec::new()),
    });
    let paste = RequestPaste::new(clipboard.clone(), injector.clone(), Duration::from_millis(50));
    let facade = Arc::new(ClipboardFacade::new(store.clone(), paste, theme));

    let (event_tx, event_rx) = event_channel();
    let capture = Arc::new(CaptureClipboard::new(store, Arc::new(ZeroClock)));
    let watcher = Arc::new(ClipboardWatcher::new(
        clipboard.clone(),
        capture,
        event_tx.clone(),
        None,
    ));

    let ui = Arc::new(RecordingUi::default());

    let runtime = AppRuntime::new(AppRuntimeParts {
        facade,
        ui: ui.clone(),
        watcher,
        hotkeys: Some(Box::new(FakeHotkeys {
            log: hotkeys.clone(),
            fail: fail_hotkeys,
        })),
        bindings: vec![
            HotkeyBinding::new(HotkeyAction::PastePopup, "ctrl+v"),
            HotkeyBinding::new(HotkeyAction::Copy, "ctrl+c"),
        ],
        poll_interval: Duration::from_millis(10),
        event_rx,
    });

    Harness {
        runtime,
        ui,
        clipboard,
        injector,
        hotkeys,
        event_tx,
    }
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + WAIT_LIMIT;
    while !condition() {
        assert!(tokio::time::Instant::now() < deadline, "condition not met in time");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Drive the runtime on the current task alongside `script`, which must end
/// by shutting the runtime down.
async fn drive<F, Fut>(runtime: AppRuntime, script: F) -> Result<()>
where
    F: FnOnce(AppRuntimeHandle) -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let handle = runtime.handle();
    let (run, script) = tokio::join!(runtime.run(), script(handle));
    script?;
    run
}

#[tokio::test]
async fn popup_hotkey_shows_placeholder_for_empty_history() -> Result<()> {
    let h = harness(false).await;
    let ui = h.ui.clone();
    let event_tx = h.event_tx.clone();

    drive(h.runtime, |handle| async move {
        event_tx
            .send(PlatformEvent::HotkeyPressed(HotkeyAction::PastePopup))
            .await?;
        wait_until(|| !ui.calls().is_empty()).await;
        handle.shutdown().await
    })
    .await?;

    assert_eq!(
        h.ui.calls()[0],
        UiCall::Show(vec![EMPTY_HISTORY_PLACEHOLDER.to_string()])
    );
    Ok(())
}

#[tokio::test]
async fn capture_while_popup_visible_refreshes_it() -> Result<()> {
    let h = harness(false).await;
    let ui = h.ui.clone();
    let clipboard = h.clipboard.clone();

    drive(h.runtime, |handle| async move {
        handle.show_popup().await?;
        wait_until(|| !ui.calls().is_empty()).await;

        clipboard.copy("fresh copy");
        wait_until(|| ui.calls().iter().any(|c| matches!(c, UiCall::Refresh(_)))).await;
        handle.shutdown().await
    })
    .await?;

    let refreshed = h
        .ui
        .calls()
        .into_iter()
        .find_map(|c| match c {
            UiCall::Refresh(lines) => Some(lines),
            _ => None,
        })
        .unwrap();
    assert!(refreshed[0].ends_with("fresh copy"));
    Ok(())
}

#[tokio::test]
async fn capture_while_hidden_does_not_touch_ui() -> Result<()> {
    let h = harness(false).await;
    let clipboard = h.clipboard.clone();
    let runtime_facade = h.runtime.facade();

    drive(h.runtime, |handle| async move {
        clipboard.copy("background");
        let facade = runtime_facade.clone();
        let deadline = tokio::time::Instant::now() + WAIT_LIMIT;
        while facade.get_history().await.is_empty() {
            assert!(tokio::time::Instant::now() < deadline);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        handle.shutdown().await
    })
    .await?;

    assert!(h.ui.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn paste_hides_popup_sets_clipboard_and_finishes_before_shutdown() -> Result<()> {
    let h = harness(false).await;
    let ui = h.ui.clone();

    drive(h.runtime, |handle| async move {
        handle.show_popup().await?;
        wait_until(|| !ui.calls().is_empty()).await;
        handle.paste("chosen").await?;
        // Shut down before the paste delay has elapsed.
        handle.shutdown().await
    })
    .await?;

    assert_eq!(h.clipboard.read_text()?, Some("chosen".to_string()));
    assert_eq!(h.injector.grab_held().len(), 1);
    assert!(h.ui.calls().contains(&UiCall::Hide));
    Ok(())
}

#[tokio::test]
async fn teardown_releases_hotkeys() -> Result<()> {
    let h = harness(false).await;

    drive(h.runtime, |handle| async move { handle.shutdown().await }).await?;

    let log = h.hotkeys.lock().unwrap();
    assert_eq!(log.registered.len(), 2);
    assert!(log.unregistered);
    assert!(!log.active);
    Ok(())
}

#[tokio::test]
async fn popup_grab_is_lifted_while_paste_is_injected() -> Result<()> {
    let h = harness(false).await;
    let injector = h.injector.clone();
    let hotkeys = h.hotkeys.clone();

    drive(h.runtime, |handle| async move {
        wait_until(|| hotkeys.lock().unwrap().active).await;
        handle.paste("chosen").await?;
        wait_until(|| {
            !injector.grab_held().is_empty() && hotkeys.lock().unwrap().registrations == 2
        })
        .await;
        handle.shutdown().await
    })
    .await?;

    assert_eq!(h.injector.grab_held(), vec![false]);
    let log = h.hotkeys.lock().unwrap();
    assert_eq!(log.registrations, 2, "grab restored once the paste finished");
    assert!(!log.active, "released again at teardown");
    Ok(())
}

#[tokio::test]
async fn hotkey_failure_does_not_stop_capture() -> Result<()> {
    let h = harness(true).await;
    let clipboard = h.clipboard.clone();
    let facade = h.runtime.facade();

    drive(h.runtime, |handle| async move {
        clipboard.copy("still captured");
        let deadline = tokio::time::Instant::now() + WAIT_LIMIT;
        while facade.get_history().await.is_empty() {
            assert!(tokio::time::Instant::now() < deadline);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        handle.shutdown().await
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn toggle_theme_refreshes_visible_popup() -> Result<()> {
    let h = harness(false).await;
    let ui = h.ui.clone();
    let facade = h.runtime.facade();

    drive(h.runtime, |handle| async move {
        handle.show_popup().await?;
        handle.toggle_theme().await?;
        wait_until(|| ui.calls().iter().any(|c| matches!(c, UiCall::Refresh(_)))).await;
        handle.shutdown().await
    })
    .await?;

    assert_eq!(facade.get_theme().await, Theme::Dark);
    Ok(())
}

#[tokio::test]
async fn handle_fails_after_runtime_stops() -> Result<()> {
    let h = harness(false).await;
    let handle = h.runtime.handle();

    drive(h.runtime, |handle| async move { handle.shutdown().await }).await?;

    assert!(handle.show_popup().await.is_err());
    Ok(())
}
