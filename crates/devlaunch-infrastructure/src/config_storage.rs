//! Client configuration file storage.
//!
//! Loads `~/.config/devlaunch/config.toml`. A missing file yields the
//! defaults; the file only needs to exist when overriding them.

use std::fs;
use std::path::PathBuf;

use devlaunch_core::Result;
use serde::{Deserialize, Serialize};

use crate::paths::DevlaunchPaths;

const DEFAULT_BASE_URL: &str = "https://devlaunch-backend.onrender.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client-side configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the Devlaunch backend.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Storage for the client configuration file.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates storage at the default path
    /// (`~/.config/devlaunch/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: DevlaunchPaths::config_file()?,
        })
    }

    /// Creates storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Persists the configuration.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(config)?)?;
        Ok(())
    }
}
