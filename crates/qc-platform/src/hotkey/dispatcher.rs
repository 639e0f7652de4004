use std::collections::HashMap;
use std::time::Duration;

use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tracing::{debug, info, warn};

use qc_core::ports::{HotkeyAction, HotkeyBinding, HotkeyError};

use super::combo::parse_combo;
use super::passive::{spawn_passive_listener, Chord};
use super::worker::Worker;
use crate::ipc::PlatformEvent;
use crate::runtime::PlatformEventSender;

/// How often the forwarding thread checks for shutdown while idle.
const FORWARDER_POLL: Duration = Duration::from_millis(100);

/// Registers suppressing bindings with the OS, watches passive bindings by
/// polling key state, and forwards presses of either onto the platform
/// event bus.
///
/// Must be created and dropped on the same thread; on macOS and Windows that
/// thread must run the platform event loop (see `HotkeyEventLoop`).
pub struct GlobalHotkeyDispatcher {
    manager: GlobalHotKeyManager,
    registered: Vec<HotKey>,
    actions: HashMap<u32, HotkeyAction>,
    event_tx: PlatformEventSender,
    forwarder: Option<Worker>,
    passive: Option<Worker>,
}

impl GlobalHotkeyDispatcher {
    pub fn new(event_tx: PlatformEventSender) -> Result<Self, HotkeyError> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| HotkeyError::Unavailable(e.to_string()))?;
        Ok(Self {
            manager,
            registered: Vec::new(),
            actions: HashMap::new(),
            event_tx,
            forwarder: None,
            passive: None,
        })
    }

    pub fn register(&mut self, bindings: &[HotkeyBinding]) -> Result<(), HotkeyError> {
        let mut chords = Vec::new();
        for binding in bindings {
            let hotkey = parse_combo(&binding.combo)?;

            if !binding.action.suppresses() {
                chords.push((Chord::parse(&binding.combo)?, binding.action));
                info!(action = %binding.action, combo = %binding.combo, "Passive hotkey watched");
                continue;
            }

            self.manager
                .register(hotkey)
                .map_err(|e| HotkeyError::RegistrationFailed {
                    combo: binding.combo.clone(),
                    reason: e.to_string(),
                })?;
            self.registered.push(hotkey);
            self.actions.insert(hotkey.id(), binding.action);
            info!(action = %binding.action, combo = %binding.combo, "Hotkey registered");
        }

        self.start_forwarder()?;
        if !chords.is_empty() {
            stop_worker(&mut self.passive);
            self.passive = Some(spawn_passive_listener(chords, self.event_tx.clone())?);
        }
        Ok(())
    }

    /// Release every OS registration and stop both listener threads. Safe to
    /// call more than once.
    pub fn unregister_all(&mut self) -> Result<(), HotkeyError> {
        stop_worker(&mut self.forwarder);
        stop_worker(&mut self.passive);

        let mut first_error = None;
        for hotkey in self.registered.drain(..) {
            if let Err(e) = self.manager.unregister(hotkey) {
                warn!(error = %e, "Failed to unregister hotkey");
                first_error.get_or_insert(HotkeyError::Unavailable(e.to_string()));
            }
        }
        self.actions.clear();

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start_forwarder(&mut self) -> Result<(), HotkeyError> {
        stop_worker(&mut self.forwarder);
        if self.actions.is_empty() {
            return Ok(());
        }

        let actions = self.actions.clone();
        let tx = self.event_tx.clone();
        let worker = Worker::spawn("qc-hotkey-forwarder", move |stop| {
            let receiver = GlobalHotKeyEvent::receiver();
            while !stop.is_stopped() {
                match receiver.recv_timeout(FORWARDER_POLL) {
                    Ok(event) => forward_event(&actions, &event, &tx),
                    Err(err) if err.is_timeout() => continue,
                    Err(_) => break,
                }
            }
            debug!("Hotkey forwarder exited");
        })?;

        self.forwarder = Some(worker);
        Ok(())
    }
}

fn stop_worker(slot: &mut Option<Worker>) {
    if let Some(worker) = slot.take() {
        worker.stop();
    }
}

/// Translate one OS hotkey event. Releases and unknown ids are ignored; a
/// full bus drops the press instead of blocking the hotkey thread.
fn forward_event(
    actions: &HashMap<u32, HotkeyAction>,
    event: &GlobalHotKeyEvent,
    tx: &PlatformEventSender,
) {
    if event.state != HotKeyState::Pressed {
        return;
    }
    let Some(action) = actions.get(&event.id) else {
        return;
    };
    if let Err(err) = tx.try_send(PlatformEvent::HotkeyPressed(*action)) {
        warn!(error = %err, %action, "Dropped hotkey press");
    }
}

impl Drop for GlobalHotkeyDispatcher {
    fn drop(&mut self) {
        if let Err(err) = self.unregister_all() {
            warn!(error = %err, "Hotkey cleanup on drop failed");
        }
    }
}
