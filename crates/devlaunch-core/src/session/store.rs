//! The process-wide session store.

use tokio::sync::watch;

use super::model::{SessionSnapshot, Token, UserProfile};
use crate::error::{DevlaunchError, Result};

/// Single-writer store for the session state.
///
/// All state changes go through the enumerated transition methods below,
/// each applied atomically (`watch::Sender::send_modify` serializes
/// mutations). Readers take snapshots or subscribe; nothing outside this
/// type mutates session state.
///
/// Transition set:
/// - `bootstrap_complete(Option<Token>)` — ends the initial credential
///   lookup; sets `bootstrapped` exactly once, never reverted.
/// - `credential_acquired(token, user)` — login/re-auth; only legal once
///   bootstrapped.
/// - `set_user(user)` — attaches a freshly fetched profile.
/// - `invalidate()` — clears credential and user from any phase.
pub struct SessionStore {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    /// Creates a store in the `Bootstrapping` phase (no token, not
    /// bootstrapped).
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self { tx }
    }

    /// Returns the current session snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Subscribes to session changes. Every transition publishes the new
    /// snapshot; receivers observe states, never intermediate values.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Convenience accessor for the current token.
    pub fn token(&self) -> Option<Token> {
        self.tx.borrow().token.clone()
    }

    /// Marks the initial credential lookup as finished.
    ///
    /// If a stored token was found the session moves to `LoggedIn`,
    /// otherwise to `LoggedOut`. Calling this after bootstrap has already
    /// completed is a no-op: `bootstrapped` never reverts and a live
    /// session is not overwritten by a late lookup.
    pub fn bootstrap_complete(&self, token: Option<Token>) {
        self.tx.send_modify(|state| {
            if state.bootstrapped {
                return;
            }
            state.bootstrapped = true;
            state.token = token;
        });
    }

    /// Records a newly acquired credential (login or re-auth).
    ///
    /// Only legal from `LoggedOut` or `LoggedIn`; during `Bootstrapping`
    /// the initial lookup has not finished and the caller is misordered.
    pub fn credential_acquired(&self, token: Token, user: UserProfile) -> Result<()> {
        let mut outcome = Ok(());
        self.tx.send_modify(|state| {
            if !state.bootstrapped {
                outcome = Err(DevlaunchError::internal(
                    "credential_acquired before bootstrap completed",
                ));
                return;
            }
            state.token = Some(token.clone());
            state.user = Some(user.clone());
        });
        outcome
    }

    /// Attaches or refreshes the user profile without touching the token.
    pub fn set_user(&self, user: UserProfile) {
        self.tx.send_modify(|state| {
            state.user = Some(user.clone());
        });
    }

    /// Clears credential and user, moving to `LoggedOut`.
    ///
    /// Legal from any phase. Returns `true` only when a live credential was
    /// actually cleared; repeated or concurrent invalidations observe an
    /// already-cleared session and return `false`. This is what makes the
    /// gateway's 401 side effect exactly-once.
    pub fn invalidate(&self) -> bool {
        let mut cleared = false;
        self.tx.send_modify(|state| {
            cleared = state.token.take().is_some();
            state.user = None;
        });
        cleared
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
