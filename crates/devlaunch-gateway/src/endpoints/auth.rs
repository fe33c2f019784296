//! Authentication and account endpoints.

use async_trait::async_trait;
use devlaunch_core::Result;
use devlaunch_core::api::{AuthApi, AuthSession, SignupRequest};
use devlaunch_core::session::UserProfile;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use super::DevlaunchApi;
use crate::transport::OutboundRequest;

#[derive(Deserialize)]
struct MeResponse {
    user: UserProfile,
}

#[async_trait]
impl AuthApi for DevlaunchApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let request = OutboundRequest::new(Method::POST, "/auth/login")
            .with_body(json!({ "email": email, "password": password }));
        self.gateway().send_json(request).await
    }

    async fn logout(&self) -> Result<()> {
        let request = OutboundRequest::new(Method::POST, "/auth/logout");
        self.gateway().send_no_content(request).await
    }

    async fn send_otp(&self, email: &str) -> Result<()> {
        let request =
            OutboundRequest::new(Method::POST, "/auth/send-otp").with_body(json!({ "email": email }));
        self.gateway().send_no_content(request).await
    }

    async fn verify_signup_otp(&self, signup: &SignupRequest, otp: &str) -> Result<AuthSession> {
        let request = OutboundRequest::new(Method::POST, "/auth/signup/verify-otp").with_body(json!({
            "name": signup.name,
            "email": signup.email,
            "password": signup.password,
            "otp": otp,
        }));
        self.gateway().send_json(request).await
    }

    async fn delete_account(&self, user_id: &str) -> Result<()> {
        let request = OutboundRequest::new(Method::DELETE, format!("/users/{user_id}"));
        self.gateway().send_no_content(request).await
    }

    async fn me(&self) -> Result<UserProfile> {
        let response: MeResponse = self.gateway().get_json("/user/me").await?;
        Ok(response.user)
    }
}
