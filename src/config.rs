use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "DOG_GALLERY_API_URL";

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_IMAGE_CACHE_CAPACITY: usize = 400;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

/// User settings, stored as JSON in the config directory
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the gallery API (also the origin of share links)
    pub api_url: String,
    /// Images kept in memory; those on the current screen are never dropped
    pub image_cache_capacity: usize,
    pub theme: ThemeChoice,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            image_cache_capacity: DEFAULT_IMAGE_CACHE_CAPACITY,
            theme: ThemeChoice::default(),
        }
    }
}

impl Config {
    /// Get the path where the config file lives:
    /// - Linux: ~/.config/dog-gallery/config.json
    /// - macOS: ~/Library/Application Support/dog-gallery/config.json
    /// - Windows: %APPDATA%\dog-gallery\config.json
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("dog-gallery");
        path.push("config.json");
        Some(path)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config file (falling back to defaults with a warning), then
    /// apply the environment override
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) => Self::from_file(&path).unwrap_or_else(|err| {
                log::warn!("{}; using default settings", err);
                Config::default()
            }),
            None => Config::default(),
        };

        config.apply_env(std::env::var(API_URL_ENV).ok());
        config
    }

    fn apply_env(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_url = url;
        }
    }
}
