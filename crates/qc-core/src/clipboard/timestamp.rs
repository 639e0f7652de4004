use chrono::{Local, TimeZone};

/// Format used for the capture timestamp shown next to each entry.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%d-%m-%Y, %H:%M";

/// Render epoch milliseconds as the local-time display string stored with an
/// entry. The string is produced once at capture and never re-derived.
pub fn format_display_timestamp(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(at) => at.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
        None => String::new(),
    }
}
