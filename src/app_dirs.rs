use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "ecosort")
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("ecosort_config.json"))
    }

    /// Log file location, under `$HOME/.local/state/ecosort` when HOME is set
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("ecosort")
                .join("ecosort.log")
        } else {
            Self::project()
                .map(|pd| pd.data_local_dir().join("ecosort.log"))
                .unwrap_or_else(|| PathBuf::from("ecosort.log"))
        }
    }
}
