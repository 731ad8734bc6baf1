//! Application configuration management.
//!
//! Configuration is optional and read-only: it tunes the HTTP client and the
//! batch opener but never stores credentials or results.
//!
//! Configuration is read from `~/.config/battlepack-opener/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::batch::ConcurrencyLimit;

/// Application name used for the config directory path
const APP_NAME: &str = "battlepack-opener";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default Battlelog host
pub const DEFAULT_BASE_URL: &str = "https://battlelog.battlefield.com";

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Cap on simultaneous open requests. `None` opens everything at once.
    pub max_concurrent_opens: Option<usize>,
    /// Cap on login attempts per run. `None` keeps asking.
    pub max_login_attempts: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_concurrent_opens: None,
            max_login_attempts: None,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn concurrency_limit(&self) -> ConcurrencyLimit {
        ConcurrencyLimit::from(self.max_concurrent_opens)
    }
}
