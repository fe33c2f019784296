//! Catalog, enrollment and progress endpoints.

use async_trait::async_trait;
use devlaunch_core::Result;
use devlaunch_core::api::{CertificateRef, CourseApi};
use devlaunch_core::course::{Course, CoursePage, CourseProgress, EnrolledCourse};
use reqwest::Method;
use serde::Deserialize;

use super::DevlaunchApi;
use crate::transport::OutboundRequest;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrolledCoursesResponse {
    enrolled_courses: Vec<EnrolledCourse>,
}

#[derive(Deserialize)]
struct SignedUrlResponse {
    url: String,
}

#[async_trait]
impl CourseApi for DevlaunchApi {
    async fn search_courses(&self, query: &str, page: u32, limit: u32) -> Result<CoursePage> {
        let request = OutboundRequest::new(Method::GET, "/courses")
            .with_query("search", query)
            .with_query("page", page.to_string())
            .with_query("limit", limit.to_string());
        self.gateway().send_json(request).await
    }

    async fn fetch_course(&self, course_id: &str) -> Result<Course> {
        self.gateway()
            .get_json(&format!("/courses/{course_id}"))
            .await
    }

    async fn my_courses(&self) -> Result<Vec<EnrolledCourse>> {
        let response: EnrolledCoursesResponse = self.gateway().get_json("/user/me/courses").await?;
        Ok(response.enrolled_courses)
    }

    async fn enroll(&self, course_id: &str) -> Result<()> {
        let request =
            OutboundRequest::new(Method::POST, format!("/user/courses/enroll/{course_id}"));
        self.gateway().send_no_content(request).await
    }

    async fn fetch_progress(&self, course_id: &str) -> Result<CourseProgress> {
        self.gateway()
            .get_json(&format!("/user/me/courses/{course_id}/progress"))
            .await
    }

    async fn toggle_video(&self, course_id: &str, video_key: &str) -> Result<CourseProgress> {
        let request = OutboundRequest::new(Method::PATCH, format!("/user/me/courses/{course_id}"))
            .with_query("videoKey", video_key);
        self.gateway().send_json(request).await
    }

    async fn signed_video_url(&self, course_id: &str, video_key: &str) -> Result<String> {
        let request = OutboundRequest::new(
            Method::GET,
            format!("/courses/{course_id}/videos/signed-url"),
        )
        .with_query("key", video_key);
        let response: SignedUrlResponse = self.gateway().send_json(request).await?;
        Ok(response.url)
    }

    async fn generate_certificate(&self, course_id: &str) -> Result<CertificateRef> {
        let request = OutboundRequest::new(
            Method::POST,
            format!("/courses/{course_id}/generate-certificate"),
        );
        self.gateway().send_json(request).await
    }
}
