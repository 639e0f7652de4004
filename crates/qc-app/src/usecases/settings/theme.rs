use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use qc_core::ports::SettingsPort;
use qc_core::{Settings, Theme};

use crate::persistence::PersistencePolicy;

/// Process-wide theme preference, persisted immediately on change.
pub struct ThemeState {
    current: RwLock<Theme>,
    settings: Arc<dyn SettingsPort>,
    policy: PersistencePolicy,
}

impl ThemeState {
    /// Missing or malformed storage falls back to [`Theme::Light`].
    pub async fn load(settings: Arc<dyn SettingsPort>, policy: PersistencePolicy) -> Self {
        let theme = match settings.load().await {
            Ok(loaded) => loaded.theme,
            Err(err) => {
                warn!(error = %err, "Failed to load theme, using light");
                Theme::default()
            }
        };
        debug!(%theme, "Theme loaded");

        Self {
            current: RwLock::new(theme),
            settings,
            policy,
        }
    }

    pub async fn get(&self) -> Theme {
        *self.current.read().await
    }

    pub async fn set(&self, theme: Theme) -> Theme {
        let mut current = self.current.write().await;
        if *current == theme {
            return theme;
        }
        *current = theme;
        self.persist(theme).await;
        info!(%theme, "Theme changed");
        theme
    }

    pub async fn toggle(&self) -> Theme {
        let mut current = self.current.write().await;
        let theme = current.toggled();
        *current = theme;
        self.persist(theme).await;
        info!(%theme, "Theme toggled");
        theme
    }

    async fn persist(&self, theme: Theme) {
        let settings = &Settings { theme };
        let port = &self.settings;
        self.policy
            .run("theme", move || port.save(settings))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySettings {
        stored: Mutex<Option<Settings>>,
        saves: Mutex<usize>,
        fail_load: bool,
    }

    #[async_trait::async_trait]
    impl SettingsPort for MemorySettings {
        async fn load(&self) -> anyhow::Result<Settings> {
            if self.fail_load {
                anyhow::bail!("malformed theme file");
            }
            Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
        }

        async fn save(&self, settings: &Settings) -> anyhow::Result<()> {
            *self.saves.lock().unwrap() += 1;
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn malformed_storage_defaults_to_light() {
        let settings = Arc::new(MemorySettings {
            fail_load: true,
            ..MemorySettings::default()
        });

        let state = ThemeState::load(settings, PersistencePolicy::default()).await;

        assert_eq!(state.get().await, Theme::Light);
    }

    #[tokio::test]
    async fn toggle_persists_immediately() {
        let settings = Arc::new(MemorySettings::default());
        let state = ThemeState::load(settings.clone(), PersistencePolicy::default()).await;

        assert_eq!(state.toggle().await, Theme::Dark);
        assert_eq!(
            settings.stored.lock().unwrap().as_ref().map(|s| s.theme),
            Some(Theme::Dark)
        );
        assert_eq!(state.toggle().await, Theme::Light);
        assert_eq!(*settings.saves.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn setting_same_theme_does_not_write() {
        let settings = Arc::new(MemorySettings::default());
        let state = ThemeState::load(settings.clone(), PersistencePolicy::default()).await;

        state.set(Theme::Light).await;
        state.set(Theme::Dark).await;

        assert_eq!(*settings.saves.lock().unwrap(), 1);
        assert_eq!(state.get().await, Theme::Dark);
    }
}
