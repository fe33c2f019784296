//! Session use case implementation.
//!
//! Orchestrates the session lifecycle: the startup credential lookup,
//! login/signup flows, logout and account deletion. This is the only
//! place that writes to the credential store on auth transitions; the
//! gateway owns the 401 invalidation path.

use std::sync::Arc;

use devlaunch_core::Result;
use devlaunch_core::api::{AuthApi, SignupRequest};
use devlaunch_core::session::{CredentialStore, SessionStore, UserProfile};

/// Use case for session lifecycle management.
///
/// # Responsibilities
///
/// - Bootstrapping the session from the stored credential exactly once
/// - Logging in/out and completing the OTP signup flow
/// - Keeping the credential store and session store transitions paired
/// - Account deletion with local teardown
pub struct SessionUseCase {
    auth_api: Arc<dyn AuthApi>,
    session: Arc<SessionStore>,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionUseCase {
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        session: Arc<SessionStore>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            auth_api,
            session,
            credentials,
        }
    }

    /// Performs the startup credential lookup and completes bootstrap.
    ///
    /// A storage failure is treated as "no stored credential": the session
    /// still reaches a settled phase so routing is never stuck on
    /// `Bootstrapping`.
    pub async fn bootstrap(&self) {
        let token = match self.credentials.get().await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "credential lookup failed, starting logged out");
                None
            }
        };

        let found = token.is_some();
        self.session.bootstrap_complete(token);
        tracing::info!(credential_found = found, "session bootstrap complete");
    }

    /// `POST /auth/login`, then persists the token and transitions the
    /// session store.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let auth = self.auth_api.login(email, password).await?;

        // In-memory session still works if persistence fails; the user
        // just logs in again next launch.
        if let Err(err) = self.credentials.set(&auth.token).await {
            tracing::warn!(error = %err, "failed to persist credential");
        }

        self.session
            .credential_acquired(auth.token, auth.user.clone())?;
        Ok(auth.user)
    }

    /// Requests a signup OTP for the given email.
    pub async fn send_signup_otp(&self, email: &str) -> Result<()> {
        self.auth_api.send_otp(email).await
    }

    /// Completes signup with the OTP; on success the user is logged in,
    /// same as [`login`](Self::login).
    pub async fn verify_signup_otp(&self, signup: &SignupRequest, otp: &str) -> Result<UserProfile> {
        let auth = self.auth_api.verify_signup_otp(signup, otp).await?;

        if let Err(err) = self.credentials.set(&auth.token).await {
            tracing::warn!(error = %err, "failed to persist credential");
        }

        self.session
            .credential_acquired(auth.token, auth.user.clone())?;
        Ok(auth.user)
    }

    /// Logs out: best-effort server call, then unconditional local
    /// teardown. The local session is always cleared, even if the server
    /// is unreachable.
    pub async fn logout(&self) {
        if let Err(err) = self.auth_api.logout().await {
            tracing::warn!(error = %err, "server logout failed, clearing local session anyway");
        }
        self.teardown().await;
    }

    /// Deletes the current account on the server, then tears down the
    /// local session. Fails without teardown if the server call fails.
    pub async fn delete_account(&self) -> Result<()> {
        let user_id = self
            .session
            .snapshot()
            .user
            .map(|user| user.id)
            .ok_or_else(|| devlaunch_core::DevlaunchError::internal("no user in session"))?;

        self.auth_api.delete_account(&user_id).await?;
        self.teardown().await;
        Ok(())
    }

    /// `GET /user/me`, refreshing the profile on the session snapshot.
    pub async fn refresh_profile(&self) -> Result<UserProfile> {
        let user = self.auth_api.me().await?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    async fn teardown(&self) {
        if let Err(err) = self.credentials.clear().await {
            tracing::warn!(error = %err, "failed to clear stored credential");
        }
        self.session.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAuthApi, MockCredentials};
    use devlaunch_core::DevlaunchError;
    use devlaunch_core::api::AuthSession;
    use devlaunch_core::session::{SessionPhase, Token};

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn auth_session() -> AuthSession {
        AuthSession {
            token: Token::new("tok-login"),
            user: profile(),
        }
    }

    fn usecase(
        api: MockAuthApi,
        credentials: MockCredentials,
    ) -> (SessionUseCase, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::new());
        let usecase = SessionUseCase::new(Arc::new(api), session.clone(), Arc::new(credentials));
        (usecase, session)
    }

    #[tokio::test]
    async fn bootstrap_restores_stored_credential() {
        let credentials = MockCredentials::with_token(Token::new("stored"));
        let (usecase, session) = usecase(MockAuthApi::default(), credentials);

        usecase.bootstrap().await;

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase(), SessionPhase::LoggedIn);
        assert_eq!(snapshot.token.unwrap().as_str(), "stored");
    }

    #[tokio::test]
    async fn bootstrap_without_credential_settles_logged_out() {
        let (usecase, session) = usecase(MockAuthApi::default(), MockCredentials::default());

        usecase.bootstrap().await;

        assert_eq!(session.snapshot().phase(), SessionPhase::LoggedOut);
    }

    #[tokio::test]
    async fn login_persists_token_and_transitions() {
        let api = MockAuthApi::default();
        api.script_login(Ok(auth_session()));
        let credentials = MockCredentials::default();
        let stored = credentials.handle();
        let (usecase, session) = usecase(api, credentials);
        usecase.bootstrap().await;

        let user = usecase.login("ada@example.com", "pw").await.unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(session.snapshot().phase(), SessionPhase::LoggedIn);
        assert_eq!(stored.current().unwrap().as_str(), "tok-login");
    }

    #[tokio::test]
    async fn failed_login_leaves_session_untouched() {
        let api = MockAuthApi::default();
        api.script_login(Err(DevlaunchError::domain(400, "bad credentials")));
        let (usecase, session) = usecase(api, MockCredentials::default());
        usecase.bootstrap().await;

        let err = usecase.login("ada@example.com", "wrong").await;

        assert!(matches!(err, Err(DevlaunchError::Domain { .. })));
        assert_eq!(session.snapshot().phase(), SessionPhase::LoggedOut);
    }

    #[tokio::test]
    async fn logout_clears_locally_even_when_server_fails() {
        let api = MockAuthApi::default();
        api.script_login(Ok(auth_session()));
        api.script_logout(Err(DevlaunchError::transport("offline")));
        let credentials = MockCredentials::default();
        let stored = credentials.handle();
        let (usecase, session) = usecase(api, credentials);
        usecase.bootstrap().await;
        usecase.login("ada@example.com", "pw").await.unwrap();

        usecase.logout().await;

        assert_eq!(session.snapshot().phase(), SessionPhase::LoggedOut);
        assert!(stored.current().is_none());
    }

    #[tokio::test]
    async fn delete_account_requires_server_success() {
        let api = MockAuthApi::default();
        api.script_login(Ok(auth_session()));
        api.script_delete_account(Err(DevlaunchError::domain(500, "try later")));
        let (usecase, session) = usecase(api, MockCredentials::default());
        usecase.bootstrap().await;
        usecase.login("ada@example.com", "pw").await.unwrap();

        let err = usecase.delete_account().await;

        assert!(err.is_err());
        // Local session survives a failed server-side deletion.
        assert_eq!(session.snapshot().phase(), SessionPhase::LoggedIn);
    }

    #[tokio::test]
    async fn signup_verification_logs_in() {
        let api = MockAuthApi::default();
        api.script_verify_otp(Ok(auth_session()));
        let (usecase, session) = usecase(api, MockCredentials::default());
        usecase.bootstrap().await;

        let signup = SignupRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
        };
        usecase.verify_signup_otp(&signup, "123456").await.unwrap();

        assert_eq!(session.snapshot().phase(), SessionPhase::LoggedIn);
    }
}
