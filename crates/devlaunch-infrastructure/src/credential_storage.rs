//! Credential persistence.
//!
//! `FileCredentialStore` keeps the single bearer token in a small JSON
//! document under the config directory, written via tmp file + atomic
//! rename so a crash mid-write never leaves a torn credential.
//! `MemoryCredentialStore` backs tests and ephemeral sessions.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use devlaunch_core::session::{CredentialStore, Token};
use devlaunch_core::{DevlaunchError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::paths::DevlaunchPaths;

/// On-disk shape of the credential file.
#[derive(Debug, Serialize, Deserialize)]
struct CredentialDocument {
    token: Token,
    saved_at: DateTime<Utc>,
}

/// File-backed credential store.
///
/// # Security Note
///
/// The token is stored as plaintext JSON; the file should carry
/// restrictive permissions. Swapping in an OS keychain later only means
/// providing another `CredentialStore` implementation.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store at the default path
    /// (`~/.config/devlaunch/credentials.json`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: DevlaunchPaths::credential_file()?,
        })
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn write_atomic(&self, content: &str) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| DevlaunchError::storage("credential path has no parent directory"))?;
        fs::create_dir_all(parent)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> Result<Option<Token>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let document: CredentialDocument = serde_json::from_str(&content)?;
        Ok(Some(document.token))
    }

    async fn set(&self, token: &Token) -> Result<()> {
        let document = CredentialDocument {
            token: token.clone(),
            saved_at: Utc::now(),
        };
        self.write_atomic(&serde_json::to_string_pretty(&document)?)?;
        tracing::debug!(path = %self.path.display(), "credential persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory credential store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<Token>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a token, e.g. to simulate a previous login.
    pub fn with_token(token: Token) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<Token>> {
        Ok(self.token.read().await.clone())
    }

    async fn set(&self, token: &Token) -> Result<()> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}
