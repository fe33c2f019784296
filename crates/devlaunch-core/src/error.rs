//! Error types for the Devlaunch client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Devlaunch client.
///
/// The variants form the failure taxonomy every layer speaks:
/// only `Unauthenticated` carries a global side effect (the session is
/// cleared by the gateway before it surfaces); everything else is resolved
/// locally by the use case that issued the call.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DevlaunchError {
    /// The server rejected the bearer credential (HTTP 401).
    ///
    /// By the time a caller sees this, the session has already been
    /// invalidated exactly once.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Any other non-2xx response. Surfaced to the caller for local
    /// handling; never triggers a global state change.
    #[error("Request rejected ({status}): {message}")]
    Domain { status: u16, message: String },

    /// Network-level failure (connection refused, DNS, broken pipe).
    /// Retryable at the caller's discretion; the core never retries.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The server did not respond within the gateway's fixed timeout.
    #[error("Request timed out")]
    Timeout,

    /// Local gate rejection: the operation requires enrollment in the
    /// course. No network call was made.
    #[error("Not enrolled in course '{course_id}'")]
    NotEnrolled { course_id: String },

    /// Local gate rejection: certificate requested below 100% progress.
    /// No network call was made.
    #[error("Certificate locked at {progress}% progress")]
    CertificateLocked { progress: u8 },

    /// Credential/config storage failure (file system).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DevlaunchError {
    /// Creates a Domain error from a status code and message.
    pub fn domain(status: u16, message: impl Into<String>) -> Self {
        Self::Domain {
            status,
            message: message.into(),
        }
    }

    /// Creates a Transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a NotEnrolled gate rejection for a course.
    pub fn not_enrolled(course_id: impl Into<String>) -> Self {
        Self::NotEnrolled {
            course_id: course_id.into(),
        }
    }

    /// Creates a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is the authentication failure that cleared the session.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this is a local gate rejection (no network call was made).
    pub fn is_local_gate(&self) -> bool {
        matches!(
            self,
            Self::NotEnrolled { .. } | Self::CertificateLocked { .. }
        )
    }

    /// Check if a caller-level retry could plausibly succeed.
    ///
    /// True for transport failures and timeouts. Domain errors and gate
    /// rejections are deterministic and not retryable as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DevlaunchError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for DevlaunchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DevlaunchError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DevlaunchError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DevlaunchError>`.
pub type Result<T> = std::result::Result<T, DevlaunchError>;
