use std::path::PathBuf;

use qc_core::app_dirs::AppDirs;
use qc_core::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub history_path: PathBuf,
    pub theme_path: PathBuf,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            history_path: dirs.app_data_root.join("history.json"),
            theme_path: dirs.app_data_root.join("theme.json"),
            config_path: dirs.app_data_root.join("config.toml"),
            logs_dir: dirs.app_data_root.join("logs"),
        }
    }

    /// Apply path overrides from a loaded configuration.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        if let Some(path) = &config.history.path {
            self.history_path = path.clone();
        }
        if let Some(path) = &config.theme.path {
            self.theme_path = path.clone();
        }
        self
    }
}
