//! Global hotkey port
//!
//! Bindings are described as text combos (`"ctrl+v"`) and resolved by the
//! platform adapter. Activations are delivered on the platform event bus.

use std::fmt;

use thiserror::Error;

/// What a global hotkey activation means to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    /// Show the paste popup instead of pasting.
    PastePopup,
    /// Observed copy keystroke, passed through to the focused application.
    /// Capture itself is driven by polling.
    Copy,
}

impl HotkeyAction {
    /// Whether the keystroke is withheld from the focused application.
    ///
    /// The copy keystroke must still reach the application, otherwise
    /// nothing would ever land on the clipboard.
    pub fn suppresses(&self) -> bool {
        matches!(self, HotkeyAction::PastePopup)
    }
}

impl fmt::Display for HotkeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HotkeyAction::PastePopup => f.write_str("paste_popup"),
            HotkeyAction::Copy => f.write_str("copy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub action: HotkeyAction,
    pub combo: String,
}

impl HotkeyBinding {
    pub fn new(action: HotkeyAction, combo: impl Into<String>) -> Self {
        Self {
            action,
            combo: combo.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("invalid hotkey combo '{combo}': {reason}")]
    InvalidCombo { combo: String, reason: String },

    #[error("failed to register hotkey '{combo}': {reason}")]
    RegistrationFailed { combo: String, reason: String },

    #[error("hotkey backend unavailable: {0}")]
    Unavailable(String),
}

/// Registers global hotkeys with the OS.
///
/// Backends that must stay on the thread owning the platform event loop
/// implement this by forwarding requests to that thread.
#[async_trait::async_trait]
pub trait HotkeyPort: Send + Sync {
    async fn register(&self, bindings: &[HotkeyBinding]) -> Result<(), HotkeyError>;

    /// Release every registration. Safe to call more than once.
    async fn unregister_all(&self) -> Result<(), HotkeyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_paste_popup_is_suppressed() {
        assert!(HotkeyAction::PastePopup.suppresses());
        assert!(!HotkeyAction::Copy.suppresses());
    }
}
