//! Clipboard domain models.
mod entry;
mod history;
mod normalize;
mod timestamp;

pub use entry::ClipboardEntry;
pub use history::{CaptureOutcome, History, HistoryError};
pub use normalize::{normalize, NormalizedText};
pub use timestamp::{format_display_timestamp, DISPLAY_TIMESTAMP_FORMAT};
