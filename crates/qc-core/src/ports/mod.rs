//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure or platform implementations, so the history rules
//! never depend on an OS clipboard, a keyboard hook or a file format.

pub mod app_dirs;
mod clipboard_change_handler;
mod clock;
pub mod errors;
pub mod history_repository;
pub mod hotkey;
mod paste;
pub mod settings;
mod system_clipboard;
pub mod ui_port;

pub use app_dirs::AppDirsPort;
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clock::ClockPort;
pub use errors::AppDirsError;
pub use history_repository::HistoryRepositoryPort;
pub use hotkey::{HotkeyAction, HotkeyBinding, HotkeyError, HotkeyPort};
pub use paste::PasteInjectorPort;
pub use settings::SettingsPort;
pub use system_clipboard::SystemClipboardPort;
pub use ui_port::{PopupView, UiPort, EMPTY_HISTORY_PLACEHOLDER};
