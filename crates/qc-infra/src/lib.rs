//! # qc-infra
//!
//! File-backed adapters for the core ports: history and settings
//! repositories writing JSON atomically, plus the system clock.

pub mod fs;
pub mod history;
pub mod settings;
pub mod time;

pub use history::FileHistoryRepository;
pub use settings::FileSettingsRepository;
pub use time::SystemClock;
