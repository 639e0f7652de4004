//! Non-suppressing key chords.
//!
//! An OS hotkey grab swallows the keystroke, which must never happen to the
//! copy shortcut. Passive chords are detected by polling the keyboard state
//! instead, so the focused application still receives the keys.

use std::time::Duration;

use device_query::{DeviceQuery, DeviceState, Keycode};
use tracing::{debug, warn};

use qc_core::ports::{HotkeyAction, HotkeyError};

use super::combo::{split_combo, ComboParts};
use super::worker::Worker;
use crate::ipc::PlatformEvent;
use crate::runtime::PlatformEventSender;

const PASSIVE_POLL: Duration = Duration::from_millis(25);

const CTRL: &[Keycode] = &[Keycode::LControl, Keycode::RControl];
const SHIFT: &[Keycode] = &[Keycode::LShift, Keycode::RShift];
const ALT: &[Keycode] = &[Keycode::LAlt, Keycode::RAlt];
const META: &[Keycode] = &[Keycode::LMeta, Keycode::RMeta];

/// A key plus the modifier groups that must be held with it. Either side of
/// a modifier satisfies its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chord {
    modifiers: Vec<&'static [Keycode]>,
    key: Keycode,
}

impl Chord {
    pub(crate) fn parse(combo: &str) -> Result<Self, HotkeyError> {
        let ComboParts {
            ctrl,
            shift,
            alt,
            meta,
            key,
        } = split_combo(combo)?;

        let key = keycode(&key).ok_or_else(|| HotkeyError::InvalidCombo {
            combo: combo.to_string(),
            reason: format!("key '{key}' cannot be observed passively"),
        })?;

        let modifiers = [(ctrl, CTRL), (shift, SHIFT), (alt, ALT), (meta, META)]
            .into_iter()
            .filter_map(|(held, group)| held.then_some(group))
            .collect();

        Ok(Self { modifiers, key })
    }

    fn is_down(&self, pressed: &[Keycode]) -> bool {
        pressed.contains(&self.key)
            && self
                .modifiers
                .iter()
                .all(|group| group.iter().any(|code| pressed.contains(code)))
    }
}

fn keycode(key: &str) -> Option<Keycode> {
    let code = match key {
        "a" => Keycode::A,
        "b" => Keycode::B,
        "c" => Keycode::C,
        "d" => Keycode::D,
        "e" => Keycode::E,
        "f" => Keycode::F,
        "g" => Keycode::G,
        "h" => Keycode::H,
        "i" => Keycode::I,
        "j" => Keycode::J,
        "k" => Keycode::K,
        "l" => Keycode::L,
        "m" => Keycode::M,
        "n" => Keycode::N,
        "o" => Keycode::O,
        "p" => Keycode::P,
        "q" => Keycode::Q,
        "r" => Keycode::R,
        "s" => Keycode::S,
        "t" => Keycode::T,
        "u" => Keycode::U,
        "v" => Keycode::V,
        "w" => Keycode::W,
        "x" => Keycode::X,
        "y" => Keycode::Y,
        "z" => Keycode::Z,
        "0" => Keycode::Key0,
        "1" => Keycode::Key1,
        "2" => Keycode::Key2,
        "3" => Keycode::Key3,
        "4" => Keycode::Key4,
        "5" => Keycode::Key5,
        "6" => Keycode::Key6,
        "7" => Keycode::Key7,
        "8" => Keycode::Key8,
        "9" => Keycode::Key9,
        "f1" => Keycode::F1,
        "f2" => Keycode::F2,
        "f3" => Keycode::F3,
        "f4" => Keycode::F4,
        "f5" => Keycode::F5,
        "f6" => Keycode::F6,
        "f7" => Keycode::F7,
        "f8" => Keycode::F8,
        "f9" => Keycode::F9,
        "f10" => Keycode::F10,
        "f11" => Keycode::F11,
        "f12" => Keycode::F12,
        "space" => Keycode::Space,
        "enter" => Keycode::Enter,
        "tab" => Keycode::Tab,
        "esc" => Keycode::Escape,
        "insert" => Keycode::Insert,
        "delete" => Keycode::Delete,
        _ => return None,
    };
    Some(code)
}

/// Actions whose chord went from released to held since the last poll.
/// `held` carries the per-chord state between polls.
pub(crate) fn rising_edges(
    chords: &[(Chord, HotkeyAction)],
    held: &mut [bool],
    pressed: &[Keycode],
) -> Vec<HotkeyAction> {
    let mut fired = Vec::new();
    for ((chord, action), was_down) in chords.iter().zip(held.iter_mut()) {
        let down = chord.is_down(pressed);
        if down && !*was_down {
            fired.push(*action);
        }
        *was_down = down;
    }
    fired
}

/// Start a thread that polls the keyboard and emits
/// [`PlatformEvent::HotkeyPressed`] once per chord press.
pub(crate) fn spawn_passive_listener(
    chords: Vec<(Chord, HotkeyAction)>,
    tx: PlatformEventSender,
) -> Result<Worker, HotkeyError> {
    Worker::spawn("qc-passive-keys", move |stop| {
        // Created on the polling thread; some backends are thread-affine.
        let device = DeviceState::new();
        let mut held = vec![false; chords.len()];

        while !stop.is_stopped() {
            let pressed = device.get_keys();
            for action in rising_edges(&chords, &mut held, &pressed) {
                if let Err(err) = tx.try_send(PlatformEvent::HotkeyPressed(action)) {
                    warn!(error = %err, %action, "Dropped passive key press");
                }
            }
            std::thread::sleep(PASSIVE_POLL);
        }
        debug!("Passive key listener exited");
    })
}
