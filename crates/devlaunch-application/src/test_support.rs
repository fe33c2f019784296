//! Scripted doubles for the API and credential seams.
//!
//! Each mock pops pre-scripted results per endpoint and records every call
//! it receives, so tests can assert both state and traffic.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use devlaunch_core::api::{AuthApi, AuthSession, CertificateRef, CourseApi, SignupRequest};
use devlaunch_core::course::{
    CompletedVideo, Course, CoursePage, CourseProgress, EnrolledCourse, Video,
};
use devlaunch_core::session::{CredentialStore, Token, UserProfile};
use devlaunch_core::{DevlaunchError, Result};

// ============================================================================
// Builders
// ============================================================================

pub fn course(id: &str, category: Option<&str>) -> Course {
    Course {
        id: id.to_string(),
        title: format!("Course {id}"),
        description: String::new(),
        category: category.map(str::to_string),
        price: 500.0,
        is_free: false,
        thumbnail: None,
        creator: None,
        is_published: true,
        total_enrollments: 0,
        avg_progress: 0.0,
        videos: Vec::new(),
    }
}

pub fn course_with_videos(id: &str, keys: &[&str]) -> Course {
    let mut built = course(id, Some("Programming"));
    built.videos = keys
        .iter()
        .map(|key| Video {
            key: key.to_string(),
            title: format!("Video {key}"),
            description: None,
            thumbnail: None,
        })
        .collect();
    built
}

pub fn page(courses: Vec<Course>) -> CoursePage {
    CoursePage {
        total_courses: courses.len() as u32,
        courses,
        page: 1,
        total_pages: 1,
    }
}

pub fn progress(percent: u8, keys: &[&str]) -> CourseProgress {
    CourseProgress {
        progress: percent,
        completed_videos: keys
            .iter()
            .map(|key| CompletedVideo {
                key: key.to_string(),
            })
            .collect(),
    }
}

pub fn enrollment(course_id: &str, percent: u8) -> EnrolledCourse {
    EnrolledCourse {
        course: course(course_id, None),
        progress: percent,
        enrolled_at: None,
    }
}

// ============================================================================
// CourseApi double
// ============================================================================

type Script<T> = Mutex<VecDeque<(Option<Duration>, Result<T>)>>;

#[derive(Default)]
pub struct MockCourseApi {
    calls: Mutex<Vec<String>>,
    search: Script<CoursePage>,
    courses: Script<Course>,
    enrollments: Script<Vec<EnrolledCourse>>,
    enrolls: Script<()>,
    progresses: Script<CourseProgress>,
    toggles: Script<CourseProgress>,
    signed_urls: Script<String>,
    certificates: Script<CertificateRef>,
}

impl MockCourseApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn script_search(&self, result: Result<CoursePage>) {
        self.search.lock().unwrap().push_back((None, result));
    }

    pub fn script_search_delayed(&self, delay: Duration, result: Result<CoursePage>) {
        self.search.lock().unwrap().push_back((Some(delay), result));
    }

    pub fn script_fetch_course(&self, result: Result<Course>) {
        self.courses.lock().unwrap().push_back((None, result));
    }

    pub fn script_my_courses(&self, result: Result<Vec<EnrolledCourse>>) {
        self.enrollments.lock().unwrap().push_back((None, result));
    }

    pub fn script_enroll(&self, result: Result<()>) {
        self.enrolls.lock().unwrap().push_back((None, result));
    }

    pub fn script_fetch_progress(&self, result: Result<CourseProgress>) {
        self.progresses.lock().unwrap().push_back((None, result));
    }

    pub fn script_toggle(&self, result: Result<CourseProgress>) {
        self.toggles.lock().unwrap().push_back((None, result));
    }

    pub fn script_signed_url(&self, result: Result<String>) {
        self.signed_urls.lock().unwrap().push_back((None, result));
    }

    pub fn script_certificate(&self, result: Result<CertificateRef>) {
        self.certificates.lock().unwrap().push_back((None, result));
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn take<T>(&self, script: &Script<T>, endpoint: &str) -> Result<T> {
        let entry = script.lock().unwrap().pop_front();
        match entry {
            Some((delay, result)) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(DevlaunchError::internal(format!(
                "unscripted call: {endpoint}"
            ))),
        }
    }
}

#[async_trait]
impl CourseApi for MockCourseApi {
    async fn search_courses(&self, query: &str, page: u32, limit: u32) -> Result<CoursePage> {
        self.record(format!("search_courses {query} {page} {limit}"));
        self.take(&self.search, "search_courses").await
    }

    async fn fetch_course(&self, course_id: &str) -> Result<Course> {
        self.record(format!("fetch_course {course_id}"));
        self.take(&self.courses, "fetch_course").await
    }

    async fn my_courses(&self) -> Result<Vec<EnrolledCourse>> {
        self.record("my_courses".to_string());
        self.take(&self.enrollments, "my_courses").await
    }

    async fn enroll(&self, course_id: &str) -> Result<()> {
        self.record(format!("enroll {course_id}"));
        self.take(&self.enrolls, "enroll").await
    }

    async fn fetch_progress(&self, course_id: &str) -> Result<CourseProgress> {
        self.record(format!("fetch_progress {course_id}"));
        self.take(&self.progresses, "fetch_progress").await
    }

    async fn toggle_video(&self, course_id: &str, video_key: &str) -> Result<CourseProgress> {
        self.record(format!("toggle_video {course_id} {video_key}"));
        self.take(&self.toggles, "toggle_video").await
    }

    async fn signed_video_url(&self, course_id: &str, video_key: &str) -> Result<String> {
        self.record(format!("signed_video_url {course_id} {video_key}"));
        self.take(&self.signed_urls, "signed_video_url").await
    }

    async fn generate_certificate(&self, course_id: &str) -> Result<CertificateRef> {
        self.record(format!("generate_certificate {course_id}"));
        self.take(&self.certificates, "generate_certificate").await
    }
}

// ============================================================================
// AuthApi double
// ============================================================================

#[derive(Default)]
pub struct MockAuthApi {
    logins: Script<AuthSession>,
    logouts: Script<()>,
    otps: Script<()>,
    verifications: Script<AuthSession>,
    deletions: Script<()>,
    profiles: Script<UserProfile>,
}

impl MockAuthApi {
    pub fn script_login(&self, result: Result<AuthSession>) {
        self.logins.lock().unwrap().push_back((None, result));
    }

    pub fn script_logout(&self, result: Result<()>) {
        self.logouts.lock().unwrap().push_back((None, result));
    }

    pub fn script_send_otp(&self, result: Result<()>) {
        self.otps.lock().unwrap().push_back((None, result));
    }

    pub fn script_verify_otp(&self, result: Result<AuthSession>) {
        self.verifications.lock().unwrap().push_back((None, result));
    }

    pub fn script_delete_account(&self, result: Result<()>) {
        self.deletions.lock().unwrap().push_back((None, result));
    }

    pub fn script_me(&self, result: Result<UserProfile>) {
        self.profiles.lock().unwrap().push_back((None, result));
    }

    fn take<T>(&self, script: &Script<T>, endpoint: &str) -> Result<T> {
        script
            .lock()
            .unwrap()
            .pop_front()
            .map(|(_, result)| result)
            .unwrap_or_else(|| {
                Err(DevlaunchError::internal(format!(
                    "unscripted call: {endpoint}"
                )))
            })
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthSession> {
        self.take(&self.logins, "login")
    }

    async fn logout(&self) -> Result<()> {
        self.take(&self.logouts, "logout")
    }

    async fn send_otp(&self, _email: &str) -> Result<()> {
        self.take(&self.otps, "send_otp")
    }

    async fn verify_signup_otp(&self, _signup: &SignupRequest, _otp: &str) -> Result<AuthSession> {
        self.take(&self.verifications, "verify_signup_otp")
    }

    async fn delete_account(&self, _user_id: &str) -> Result<()> {
        self.take(&self.deletions, "delete_account")
    }

    async fn me(&self) -> Result<UserProfile> {
        self.take(&self.profiles, "me")
    }
}

// ============================================================================
// CredentialStore double
// ============================================================================

/// Cloneable in-memory credential store; clones share the same slot so
/// tests can inspect what the use case persisted.
#[derive(Default, Clone)]
pub struct MockCredentials {
    slot: Arc<Mutex<Option<Token>>>,
}

impl MockCredentials {
    pub fn with_token(token: Token) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token))),
        }
    }

    /// A shared view onto the same slot.
    pub fn handle(&self) -> Self {
        self.clone()
    }

    pub fn current(&self) -> Option<Token> {
        self.slot.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for MockCredentials {
    async fn get(&self) -> Result<Option<Token>> {
        Ok(self.current())
    }

    async fn set(&self, token: &Token) -> Result<()> {
        *self.slot.lock().unwrap() = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
