//! # qc-platform
//!
//! OS-facing adapters for QuickClip: the system clipboard, the clipboard
//! poll task, global hotkeys, synthetic paste keystrokes and per-user data
//! directories, plus the event and command bus that connects them to the
//! runtime.

pub mod app_dirs;
pub mod clipboard;
pub mod hotkey;
pub mod ipc;
pub mod paste;
pub mod runtime;

pub use app_dirs::DirsAppDirsAdapter;
pub use clipboard::{ClipboardWatcher, LocalClipboard};
pub use hotkey::{GlobalHotkeyDispatcher, HotkeyEventLoop, LoopHotkeys};
pub use paste::EnigoPasteInjector;
