use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{TaskboardError, TaskboardResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_NAME_LENGTH: usize = 255;

pub const API_URL_ENV: &str = "TASKBOARD_API_URL";
pub const CREDENTIALS_ENV: &str = "TASKBOARD_CREDENTIALS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_name_length: Option<usize>,
}

impl AppConfig {
    pub fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads the config file, falling back to defaults, then applies
    /// environment overrides.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match std::fs::read_to_string(&config_path) {
                    Ok(content) => match Self::from_toml(&content) {
                        Ok(parsed) => config = parsed,
                        Err(e) => tracing::warn!("Ignoring {}: {}", config_path.display(), e),
                    },
                    Err(e) => tracing::warn!("Cannot read {}: {}", config_path.display(), e),
                }
            }
        }
        config.with_env_overrides()
    }

    pub fn from_toml(content: &str) -> TaskboardResult<Self> {
        toml::from_str(content).map_err(|e| TaskboardError::Config(e.to_string()))
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = Some(url);
            }
        }
        if let Ok(path) = std::env::var(CREDENTIALS_ENV) {
            if !path.trim().is_empty() {
                self.credentials_path = Some(PathBuf::from(path));
            }
        }
        self
    }

    pub fn effective_api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or(DEFAULT_API_URL)
    }

    pub fn effective_credentials_path(&self) -> TaskboardResult<PathBuf> {
        if let Some(path) = &self.credentials_path {
            return Ok(path.clone());
        }
        Self::config_dir()
            .map(|dir| dir.join("credentials.json"))
            .ok_or_else(|| {
                TaskboardError::Config("no config directory on this platform".to_string())
            })
    }

    pub fn effective_request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn effective_max_name_length(&self) -> usize {
        self.max_name_length.unwrap_or(DEFAULT_MAX_NAME_LENGTH)
    }
}
