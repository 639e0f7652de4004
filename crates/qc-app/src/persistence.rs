//! Best-effort persistence.
//!
//! Writes never fail the caller: the in-memory state stays authoritative and
//! the configured [`PersistenceFailurePolicy`] only decides how loudly a
//! failed write is reported and whether it is retried.

use std::future::Future;
use std::time::Duration;

use qc_core::config::{HistoryConfig, PersistenceFailurePolicy};
use tracing::{debug, warn};

const RETRY_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistencePolicy {
    pub on_failure: PersistenceFailurePolicy,
    pub retry_attempts: u32,
}

impl Default for PersistencePolicy {
    fn default() -> Self {
        Self::from(&HistoryConfig::default())
    }
}

impl From<&HistoryConfig> for PersistencePolicy {
    fn from(config: &HistoryConfig) -> Self {
        Self {
            on_failure: config.on_persistence_failure,
            retry_attempts: config.retry_attempts,
        }
    }
}

impl PersistencePolicy {
    fn attempts(&self) -> u32 {
        match self.on_failure {
            PersistenceFailurePolicy::Retry => self.retry_attempts.max(1),
            _ => 1,
        }
    }

    /// Run `write` under this policy. Returns whether it eventually succeeded.
    pub async fn run<F, Fut>(&self, what: &'static str, mut write: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let attempts = self.attempts();
        for attempt in 1..=attempts {
            match write().await {
                Ok(()) => return true,
                Err(err) if attempt < attempts => {
                    debug!(what, attempt, error = %err, "Persist failed, retrying");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(err) => match self.on_failure {
                    PersistenceFailurePolicy::Ignore => {
                        debug!(what, error = %err, "Persist failed, ignored")
                    }
                    PersistenceFailurePolicy::Log | PersistenceFailurePolicy::Retry => {
                        warn!(what, attempts, error = %err, "Persist failed")
                    }
                },
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(on_failure: PersistenceFailurePolicy, retry_attempts: u32) -> PersistencePolicy {
        PersistencePolicy {
            on_failure,
            retry_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retry_policy_retries_until_success() {
        let calls = AtomicU32::new(0);

        let saved = policy(PersistenceFailurePolicy::Retry, 3)
            .run("history", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        return Err(anyhow::anyhow!("disk full"));
                    }
                    Ok(())
                }
            })
            .await;

        assert!(saved);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_policy_gives_up_after_configured_attempts() {
        let calls = AtomicU32::new(0);

        let saved = policy(PersistenceFailurePolicy::Retry, 2)
            .run("history", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(anyhow::anyhow!("read-only filesystem")) }
            })
            .await;

        assert!(!saved);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn log_and_ignore_try_once() {
        for on_failure in [PersistenceFailurePolicy::Log, PersistenceFailurePolicy::Ignore] {
            let calls = AtomicU32::new(0);

            let saved = policy(on_failure, 5)
                .run("theme", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(anyhow::anyhow!("nope")) }
                })
                .await;

            assert!(!saved);
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }
}
