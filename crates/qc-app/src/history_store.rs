//! Shared, persisted clipboard history.
//!
//! The watcher task and the presentation layer both go through this store.
//! Every successful mutation is written to the repository before the call
//! returns, under the same lock, so saves land in mutation order.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use qc_core::config::HistoryConfig;
use qc_core::ports::HistoryRepositoryPort;
use qc_core::{CaptureOutcome, ClipboardEntry, EntryId, History, HistoryError};

use crate::persistence::PersistencePolicy;

pub struct HistoryStore {
    history: RwLock<History>,
    repo: Arc<dyn HistoryRepositoryPort>,
    policy: PersistencePolicy,
    max_entries: Option<usize>,
}

impl HistoryStore {
    /// Load the history from `repo`. A missing or unreadable store starts
    /// an empty history; stored duplicates and empty texts are dropped.
    pub async fn open(repo: Arc<dyn HistoryRepositoryPort>, config: &HistoryConfig) -> Self {
        let loaded = match repo.load().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "Failed to load history, starting empty");
                Vec::new()
            }
        };

        let stored = loaded.len();
        let mut history = History::from_entries(loaded);
        if history.len() != stored {
            info!(
                dropped = stored - history.len(),
                "Dropped duplicate or empty entries from stored history"
            );
        }
        if let Some(max) = config.max_entries {
            history.truncate_to(max);
        }
        debug!(entries = history.len(), "History loaded");

        Self {
            history: RwLock::new(history),
            repo,
            policy: PersistencePolicy::from(config),
            max_entries: config.max_entries,
        }
    }

    /// Entries most recent first.
    pub async fn snapshot(&self) -> Vec<ClipboardEntry> {
        self.history.read().await.entries().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.history.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.history.read().await.is_empty()
    }

    pub async fn newest_text(&self) -> Option<String> {
        self.history
            .read()
            .await
            .newest()
            .map(|entry| entry.text.clone())
    }

    pub async fn contains_equivalent(&self, text: &str) -> bool {
        self.history.read().await.contains_equivalent(text)
    }

    pub async fn find_by_text(&self, text: &str) -> Option<usize> {
        self.history.read().await.find_by_text(text)
    }

    /// Insert at the front unless empty or equivalent to an existing entry.
    pub async fn insert(&self, entry: ClipboardEntry) -> CaptureOutcome {
        let mut history = self.history.write().await;
        let outcome = history.insert(entry);
        if outcome.is_inserted() {
            if let Some(max) = self.max_entries {
                let removed = history.truncate_to(max);
                if removed > 0 {
                    debug!(removed, max, "Trimmed oldest history entries");
                }
            }
            self.persist(&history).await;
        }
        outcome
    }

    /// Replace the text of the entry whose text equals `old_text` exactly.
    pub async fn update(&self, old_text: &str, new_text: &str) -> Result<usize, HistoryError> {
        let mut history = self.history.write().await;
        let index = history.update(old_text, new_text)?;
        self.persist(&history).await;
        Ok(index)
    }

    pub async fn update_by_id(&self, id: &EntryId, new_text: &str) -> Result<usize, HistoryError> {
        let mut history = self.history.write().await;
        let index = history.update_by_id(id, new_text)?;
        self.persist(&history).await;
        Ok(index)
    }

    async fn persist(&self, history: &History) {
        let repo = &self.repo;
        let entries = history.entries();
        self.policy
            .run("history", move || repo.save(entries))
            .await;
    }
}
