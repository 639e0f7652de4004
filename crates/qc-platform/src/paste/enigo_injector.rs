use anyhow::{Context, Result};
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use tracing::debug;

use qc_core::ports::PasteInjectorPort;

#[cfg(target_os = "macos")]
const PASTE_MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const PASTE_MODIFIER: Key = Key::Control;

/// Sends the platform paste shortcut (Cmd+V on macOS, Ctrl+V elsewhere).
///
/// A fresh `Enigo` is created per paste so no virtual keyboard stays
/// attached between pastes.
#[derive(Debug, Default)]
pub struct EnigoPasteInjector;

impl EnigoPasteInjector {
    pub fn new() -> Self {
        Self
    }
}

impl PasteInjectorPort for EnigoPasteInjector {
    fn inject_paste(&self) -> Result<()> {
        let mut enigo = Enigo::new(&Settings::default())
            .context("Failed to initialize Enigo for paste injection")?;

        enigo
            .key(PASTE_MODIFIER, Direction::Press)
            .context("Failed to press paste modifier")?;
        let click = enigo
            .key(Key::Unicode('v'), Direction::Click)
            .context("Failed to press V");
        // Release the modifier even if the click failed, or it stays held.
        enigo
            .key(PASTE_MODIFIER, Direction::Release)
            .context("Failed to release paste modifier")?;
        click?;

        debug!("Paste keystroke injected");
        Ok(())
    }
}
