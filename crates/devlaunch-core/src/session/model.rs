//! Session domain models.

use serde::{Deserialize, Serialize};

/// Opaque bearer token proving an authenticated session.
///
/// The client never inspects the token; it is stored, attached to outbound
/// requests, and cleared. `Debug` redacts the value so tokens do not leak
/// into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value, for the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token(***)")
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The authenticated user, as returned by `GET /user/me` or the login
/// response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// The three observable phases of the session lifecycle.
///
/// `Bootstrapping` lasts until the initial credential lookup completes, so
/// callers can avoid rendering a logged-out view before the stored token has
/// been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Bootstrapping,
    LoggedOut,
    LoggedIn,
}

/// A point-in-time view of the session.
///
/// There is no stored `is_authenticated` flag: authentication is derived
/// from token presence, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub token: Option<Token>,
    pub user: Option<UserProfile>,
    pub bootstrapped: bool,
}

impl SessionSnapshot {
    /// True iff a credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.bootstrapped {
            SessionPhase::Bootstrapping
        } else if self.is_authenticated() {
            SessionPhase::LoggedIn
        } else {
            SessionPhase::LoggedOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_is_derived_from_token_presence() {
        let mut snapshot = SessionSnapshot::default();
        assert!(!snapshot.is_authenticated());

        snapshot.token = Some(Token::new("abc"));
        assert!(snapshot.is_authenticated());
    }

    #[test]
    fn phase_reflects_bootstrap_then_token() {
        let mut snapshot = SessionSnapshot::default();
        assert_eq!(snapshot.phase(), SessionPhase::Bootstrapping);

        snapshot.bootstrapped = true;
        assert_eq!(snapshot.phase(), SessionPhase::LoggedOut);

        snapshot.token = Some(Token::new("abc"));
        assert_eq!(snapshot.phase(), SessionPhase::LoggedIn);
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = Token::new("super-secret");
        assert_eq!(format!("{:?}", token), "Token(***)");
    }
}
