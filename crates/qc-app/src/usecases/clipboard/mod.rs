pub mod capture_clipboard;
pub mod list_history;
pub mod request_paste;
pub mod update_entry;

pub use capture_clipboard::CaptureClipboard;
pub use list_history::ListHistory;
pub use request_paste::RequestPaste;
pub use update_entry::UpdateHistoryEntry;
