//! Course and enrollment domain models.
//!
//! These structs mirror the Devlaunch REST wire format (`_id`, camelCase)
//! so the endpoint layer deserializes responses directly into them. A
//! course is immutable once fetched within a session: the server refetches
//! it wholesale, never patches fields.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One video within a course.
///
/// `key` is the join key for completion tracking — never the array index,
/// because server-side video ordering may change between fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A course as served by `GET /courses` and `GET /courses/{id}`.
///
/// The catalog listing omits `videos`; the detail endpoint includes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub total_enrollments: u32,
    #[serde(default)]
    pub avg_progress: f64,
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// One page of catalog search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePage {
    pub courses: Vec<Course>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_courses: u32,
}

/// One entry of `GET /user/me/courses`: the enrollment relation between
/// the current user and a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    #[serde(rename = "courseId")]
    pub course: Course,
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedVideo {
    pub key: String,
}

/// Authoritative per-course progress, replaced wholesale from every server
/// response. The client never computes progress deltas locally; that would
/// drift from server-side rounding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub completed_videos: Vec<CompletedVideo>,
}

impl CourseProgress {
    /// The completed set keyed by `Video::key`.
    pub fn completed_keys(&self) -> BTreeSet<String> {
        self.completed_videos
            .iter()
            .map(|v| v.key.clone())
            .collect()
    }

    /// Whether the given video key is marked complete.
    pub fn is_completed(&self, key: &str) -> bool {
        self.completed_videos.iter().any(|v| v.key == key)
    }
}
