use global_hotkey::hotkey::{Code, HotKey, Modifiers};

use qc_core::ports::HotkeyError;

fn invalid(combo: &str, reason: impl Into<String>) -> HotkeyError {
    HotkeyError::InvalidCombo {
        combo: combo.to_string(),
        reason: reason.into(),
    }
}

fn key_code(key: &str) -> Option<Code> {
    let code = match key {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "space" => Code::Space,
        "enter" | "return" => Code::Enter,
        "tab" => Code::Tab,
        "esc" | "escape" => Code::Escape,
        "insert" => Code::Insert,
        "delete" | "del" => Code::Delete,
        _ => return None,
    };
    Some(code)
}

/// A combo split into modifier flags and one lowercase key name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ComboParts {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub key: String,
}

/// Split a `+`-separated combo such as `"ctrl+shift+v"`.
///
/// Case-insensitive. Exactly one known non-modifier key is required.
pub(crate) fn split_combo(combo: &str) -> Result<ComboParts, HotkeyError> {
    let mut parts = ComboParts::default();
    let mut key: Option<String> = None;

    for part in combo.split('+').map(str::trim) {
        if part.is_empty() {
            return Err(invalid(combo, "empty key segment"));
        }
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => parts.ctrl = true,
            "shift" => parts.shift = true,
            "alt" | "option" => parts.alt = true,
            "cmd" | "command" | "meta" | "super" | "win" => parts.meta = true,
            name => {
                if key.is_some() {
                    return Err(invalid(combo, "more than one non-modifier key"));
                }
                if key_code(name).is_none() {
                    return Err(invalid(combo, format!("unknown key '{name}'")));
                }
                key = Some(canonical_key(name).to_string());
            }
        }
    }

    parts.key = key.ok_or_else(|| invalid(combo, "missing non-modifier key"))?;
    Ok(parts)
}

fn canonical_key(name: &str) -> &str {
    match name {
        "return" => "enter",
        "escape" => "esc",
        "del" => "delete",
        other => other,
    }
}

/// Parse a combo into a `global-hotkey` registration.
pub fn parse_combo(combo: &str) -> Result<HotKey, HotkeyError> {
    let parts = split_combo(combo)?;

    let mut modifiers = Modifiers::empty();
    if parts.ctrl {
        modifiers |= Modifiers::CONTROL;
    }
    if parts.shift {
        modifiers |= Modifiers::SHIFT;
    }
    if parts.alt {
        modifiers |= Modifiers::ALT;
    }
    if parts.meta {
        modifiers |= Modifiers::META;
    }

    let code = key_code(&parts.key)
        .ok_or_else(|| invalid(combo, format!("unknown key '{}'", parts.key)))?;
    let modifiers = (!modifiers.is_empty()).then_some(modifiers);
    Ok(HotKey::new(modifiers, code))
}
