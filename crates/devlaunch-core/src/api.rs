//! Remote API trait seams.
//!
//! The application layer talks to the Devlaunch backend exclusively through
//! these traits; the gateway crate provides the HTTP implementation and
//! tests substitute scripted mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::course::{Course, CoursePage, CourseProgress, EnrolledCourse};
use crate::error::Result;
use crate::session::{Token, UserProfile};

/// The `{token, user}` envelope returned by login and signup verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: Token,
    pub user: UserProfile,
}

/// Payload for the OTP signup flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Reference to a generated certificate document, consumed by an external
/// download collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRef {
    pub certificate_url: String,
}

/// Authentication and account endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// `POST /auth/logout`
    async fn logout(&self) -> Result<()>;

    /// `POST /auth/send-otp`
    async fn send_otp(&self, email: &str) -> Result<()>;

    /// `POST /auth/signup/verify-otp` — completes signup and returns an
    /// authenticated session.
    async fn verify_signup_otp(&self, signup: &SignupRequest, otp: &str) -> Result<AuthSession>;

    /// `DELETE /users/{id}`
    async fn delete_account(&self, user_id: &str) -> Result<()>;

    /// `GET /user/me`
    async fn me(&self) -> Result<UserProfile>;
}

/// Catalog, enrollment and progress endpoints.
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// `GET /courses` with search/pagination parameters.
    async fn search_courses(&self, query: &str, page: u32, limit: u32) -> Result<CoursePage>;

    /// `GET /courses/{id}` — full course detail including videos.
    async fn fetch_course(&self, course_id: &str) -> Result<Course>;

    /// `GET /user/me/courses` — the current user's enrollments.
    async fn my_courses(&self) -> Result<Vec<EnrolledCourse>>;

    /// `POST /user/courses/enroll/{id}`
    async fn enroll(&self, course_id: &str) -> Result<()>;

    /// `GET /user/me/courses/{id}/progress`
    async fn fetch_progress(&self, course_id: &str) -> Result<CourseProgress>;

    /// `PATCH /user/me/courses/{id}?videoKey=` — toggles one video's
    /// completion and returns the authoritative progress.
    async fn toggle_video(&self, course_id: &str, video_key: &str) -> Result<CourseProgress>;

    /// `GET /courses/{id}/videos/signed-url?key=` — time-limited playback
    /// URL for one video.
    async fn signed_video_url(&self, course_id: &str, video_key: &str) -> Result<String>;

    /// `POST /courses/{id}/generate-certificate`
    async fn generate_certificate(&self, course_id: &str) -> Result<CertificateRef>;
}
