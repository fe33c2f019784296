//! Unified path management for Devlaunch client files.
//!
//! All client-side state lives under the platform config directory:
//!
//! ```text
//! ~/.config/devlaunch/
//! ├── config.toml          # Client configuration (base URL, timeout)
//! └── credentials.json     # Persisted bearer token
//! ```

use std::path::PathBuf;

use devlaunch_core::{DevlaunchError, Result};

/// Unified path resolution for the Devlaunch client.
pub struct DevlaunchPaths;

impl DevlaunchPaths {
    /// Returns the client configuration directory
    /// (e.g. `~/.config/devlaunch/` on Linux).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("devlaunch"))
            .ok_or_else(|| DevlaunchError::config("cannot determine config directory"))
    }

    /// Path to the persisted credential file.
    pub fn credential_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("credentials.json"))
    }

    /// Path to the client configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
