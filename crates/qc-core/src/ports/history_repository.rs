//! Durable storage for the clipboard history.

use async_trait::async_trait;

use crate::clipboard::ClipboardEntry;

/// Loads and saves the full history as one ordered list, most recent first.
///
/// Implementations replace the stored list wholesale on every save; there is
/// no incremental append.
#[async_trait]
pub trait HistoryRepositoryPort: Send + Sync {
    /// A missing store yields an empty list. A store that exists but cannot
    /// be decoded is an error.
    async fn load(&self) -> anyhow::Result<Vec<ClipboardEntry>>;

    async fn save(&self, entries: &[ClipboardEntry]) -> anyhow::Result<()>;
}
