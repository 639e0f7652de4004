//! Application use cases.

pub mod clipboard;
pub mod settings;

pub use clipboard::{CaptureClipboard, ListHistory, RequestPaste, UpdateHistoryEntry};
pub use settings::ThemeState;
