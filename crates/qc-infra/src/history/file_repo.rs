use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use qc_core::{ports::HistoryRepositoryPort, ClipboardEntry};

use crate::fs::atomic_write;

/// History persisted as a pretty-printed JSON array of
/// `{"id", "text", "ts"}` records, most recent first.
pub struct FileHistoryRepository {
    path: PathBuf,
}

impl FileHistoryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryRepositoryPort for FileHistoryRepository {
    async fn load(&self) -> Result<Vec<ClipboardEntry>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "history file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read history failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parse history failed: {}", self.path.display()))
    }

    async fn save(&self, entries: &[ClipboardEntry]) -> Result<()> {
        let content = serde_json::to_string_pretty(entries).context("serialize history failed")?;
        atomic_write(&self.path, &content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo_in(dir: &TempDir) -> FileHistoryRepository {
        FileHistoryRepository::new(dir.path().join("history.json"))
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() -> Result<()> {
        let tmp = TempDir::new()?;
        let repo = repo_in(&tmp);

        assert!(repo.load().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_preserves_order_and_fields() -> Result<()> {
        let tmp = TempDir::new()?;
        let repo = repo_in(&tmp);
        let entries = vec![
            ClipboardEntry::new("newest", "02-01-2024, 10:00"),
            ClipboardEntry::new("older", "01-01-2024, 09:00"),
        ];

        repo.save(&entries).await?;
        let loaded = repo.load().await?;

        assert_eq!(loaded, entries);
        Ok(())
    }

    #[tokio::test]
    async fn saved_file_uses_ts_key() -> Result<()> {
        let tmp = TempDir::new()?;
        let repo = repo_in(&tmp);

        repo.save(&[ClipboardEntry::new("x", "01-01-2024, 09:00")]).await?;
        let raw = fs::read_to_string(repo.path()).await?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;

        assert_eq!(value[0]["text"], "x");
        assert_eq!(value[0]["ts"], "01-01-2024, 09:00");
        assert!(value[0]["id"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<()> {
        let tmp = TempDir::new()?;
        let repo = repo_in(&tmp);
        fs::write(repo.path(), "{ not json").await?;

        assert!(repo.load().await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn records_without_id_still_load() -> Result<()> {
        let tmp = TempDir::new()?;
        let repo = repo_in(&tmp);
        fs::write(repo.path(), r#"[{"text":"legacy","ts":"01-01-2024, 09:00"}]"#).await?;

        let loaded = repo.load().await?;

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "legacy");
        assert!(!loaded[0].id.as_str().is_empty());
        Ok(())
    }
}
