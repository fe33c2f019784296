//! Course domain module.
//!
//! Wire-shaped course/enrollment models, the derived catalog grouping, and
//! the pure access gate.

mod access;
mod catalog;
mod model;

// Re-export public API
pub use access::{is_certificate_eligible, is_playable};
pub use catalog::{CategoryGroup, UNCATEGORIZED, group_by_category};
pub use model::{
    CompletedVideo, Course, CoursePage, CourseProgress, Creator, EnrolledCourse, Video,
};
