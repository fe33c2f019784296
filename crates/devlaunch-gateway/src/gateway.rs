//! The request gateway.
//!
//! Every outbound call goes through here: the current credential is
//! attached, the response is classified into the error taxonomy, and an
//! authentication failure invalidates the session exactly once.

use std::sync::Arc;

use devlaunch_core::session::{CredentialStore, SessionStore};
use devlaunch_core::{DevlaunchError, Result};
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::transport::{OutboundRequest, RawResponse, Transport};

/// Error envelope the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Classifies responses and owns the 401 session-invalidation side effect.
///
/// Classification:
/// - 2xx: body deserialized and passed through.
/// - 401: session invalidated (exactly once across concurrent in-flight
///   requests), then `Unauthenticated`.
/// - other 4xx/5xx: `Domain { status, message }`, no global side effect.
/// - transport failure: `Transport` or `Timeout`, caller may retry.
pub struct RequestGateway {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    credentials: Arc<dyn CredentialStore>,
}

impl RequestGateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            transport,
            session,
            credentials,
        }
    }

    /// Sends a request and deserializes the 2xx body into `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: OutboundRequest) -> Result<T> {
        let response = self.dispatch(request).await?;
        serde_json::from_str(&response.body).map_err(DevlaunchError::from)
    }

    /// Sends a request, discarding any 2xx body.
    pub async fn send_no_content(&self, request: OutboundRequest) -> Result<()> {
        self.dispatch(request).await.map(|_| ())
    }

    /// Convenience for bodyless GETs.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(OutboundRequest::new(Method::GET, path)).await
    }

    async fn dispatch(&self, mut request: OutboundRequest) -> Result<RawResponse> {
        // The credential is read at dispatch time: once the session has
        // been invalidated, later calls go out without a bearer header.
        request.bearer = self.session.token();

        let path = request.path.clone();
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|failure| failure.into_error())?;

        if response.is_success() {
            return Ok(response);
        }

        if response.status == 401 {
            self.invalidate_session().await;
            return Err(DevlaunchError::Unauthenticated);
        }

        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| response.body.trim().to_string());
        tracing::debug!(status = response.status, %path, "request rejected");
        Err(DevlaunchError::domain(response.status, message))
    }

    /// Clears session and stored credential after a 401.
    ///
    /// The store transition reports whether a live credential was cleared;
    /// only that call performs the credential-store side effect, so N
    /// concurrent 401s invalidate once.
    async fn invalidate_session(&self) {
        if self.session.invalidate() {
            tracing::warn!("server rejected credential, session invalidated");
            if let Err(err) = self.credentials.clear().await {
                tracing::warn!(error = %err, "failed to clear stored credential");
            }
        }
    }
}
