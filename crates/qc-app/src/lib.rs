//! QuickClip application layer
//!
//! Use cases and the shared history store, wired against the core ports.

pub mod app_paths;
pub mod facade;
pub mod history_store;
pub mod persistence;
pub mod usecases;

pub use app_paths::AppPaths;
pub use facade::ClipboardFacade;
pub use history_store::HistoryStore;
pub use persistence::PersistencePolicy;
