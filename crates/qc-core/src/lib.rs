//! # qc-core
//!
//! Core domain models and business logic for QuickClip.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod app_dirs;
pub mod clipboard;
pub mod config;
pub mod ids;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use clipboard::{normalize, CaptureOutcome, ClipboardEntry, History, HistoryError, NormalizedText};
pub use config::AppConfig;
pub use ids::EntryId;
pub use settings::model::{Settings, Theme};
