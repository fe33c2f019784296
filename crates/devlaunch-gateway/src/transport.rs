//! HTTP transport seam.
//!
//! The gateway classifies responses; this layer only moves bytes. Keeping
//! it behind a trait lets the classification logic be tested against
//! scripted transports without a network.

use std::time::Duration;

use async_trait::async_trait;
use devlaunch_core::session::Token;
use devlaunch_core::{DevlaunchError, Result};
use reqwest::{Client, Method};

/// Fixed request timeout. A non-responding server is classified as a
/// timeout failure, never left pending.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One outbound call, fully described before dispatch.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/courses/c1`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<Token>,
    pub body: Option<serde_json::Value>,
}

impl OutboundRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A parsed-enough response: status plus raw body text. Interpretation
/// belongs to the gateway.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-level failure, before any HTTP status exists.
#[derive(Debug, Clone)]
pub struct TransportFailure {
    pub message: String,
    pub timed_out: bool,
}

impl TransportFailure {
    /// Maps into the client error taxonomy.
    pub fn into_error(self) -> DevlaunchError {
        if self.timed_out {
            DevlaunchError::Timeout
        } else {
            DevlaunchError::transport(self.message)
        }
    }
}

/// Executes outbound requests. Implementations must not block beyond the
/// fixed timeout.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: OutboundRequest,
    ) -> std::result::Result<RawResponse, TransportFailure>;
}

/// `reqwest`-backed transport with the fixed timeout baked into the
/// client.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DevlaunchError::config(format!("HTTP client build failed: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: OutboundRequest,
    ) -> std::result::Result<RawResponse, TransportFailure> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url_for(&request.path))
            .query(&request.query);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| TransportFailure {
            message: format!("request to {} failed: {err}", request.path),
            timed_out: err.is_timeout(),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| TransportFailure {
            message: format!("failed to read response body: {err}"),
            timed_out: err.is_timeout(),
        })?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_join_handles_slashes() {
        let transport = HttpTransport::new("https://api.devlaunch.dev/").unwrap();
        assert_eq!(
            transport.url_for("/courses/c1"),
            "https://api.devlaunch.dev/courses/c1"
        );
        assert_eq!(
            transport.url_for("user/me"),
            "https://api.devlaunch.dev/user/me"
        );
    }

    #[test]
    fn timeout_failure_maps_to_timeout_error() {
        let failure = TransportFailure {
            message: "deadline".to_string(),
            timed_out: true,
        };
        assert!(matches!(failure.into_error(), DevlaunchError::Timeout));

        let failure = TransportFailure {
            message: "refused".to_string(),
            timed_out: false,
        };
        assert!(matches!(
            failure.into_error(),
            DevlaunchError::Transport { .. }
        ));
    }

    #[test]
    fn request_builder_accumulates_query() {
        let request = OutboundRequest::new(Method::GET, "/courses")
            .with_query("search", "rust")
            .with_query("page", "1");
        assert_eq!(request.query.len(), 2);
        assert!(request.bearer.is_none());
    }
}
