use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::app_dirs::AppDirs;
use crate::scoreboard::CompletionCounting;
use crate::session::SessionConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// fixed seed for the detector; random per run when unset
    pub seed: Option<u64>,
    pub skip_login: bool,
    /// let the live camera trigger analyses on its own
    pub live_detection: bool,
    /// bump the completed-challenges counter on start as well as completion
    pub count_challenge_starts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            skip_login: false,
            live_detection: true,
            count_challenge_starts: false,
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            counting: if cfg.count_challenge_starts {
                CompletionCounting::OnStartAndCompletion
            } else {
                CompletionCounting::OnCompletion
            },
            live_detection: cfg.live_detection,
        }
    }
}

/// A config file that exists but cannot be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait ConfigStore {
    /// A missing file is the default config; a broken one is an error
    fn load(&self) -> Result<Config, ConfigError>;
    fn save(&self, cfg: &Config) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Config, ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Unreadable {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Malformed {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, cfg: &Config) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
