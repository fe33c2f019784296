//! Credential persistence trait.
//!
//! Defines the interface for the on-device token store.

use async_trait::async_trait;

use super::model::Token;
use crate::error::Result;

/// An abstract store for the single persisted bearer token.
///
/// This trait decouples the session lifecycle from the storage mechanism
/// (plaintext file, OS keychain, in-memory test double). Each operation is
/// assumed atomic and durable across process restarts.
///
/// Exactly three operations exist; there is deliberately no partial update.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the stored token, if any.
    async fn get(&self) -> Result<Option<Token>>;

    /// Persists the token, replacing any previous value.
    async fn set(&self, token: &Token) -> Result<()>;

    /// Removes the stored token. Succeeds if none was stored.
    async fn clear(&self) -> Result<()>;
}
