//! Derived catalog grouping.

use serde::{Deserialize, Serialize};

use super::model::Course;

/// Bucket name for courses without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One category bucket of the grouped catalog view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub courses: Vec<Course>,
}

/// Groups courses by `category`, preserving first-seen category order and
/// the course order within each bucket. Courses without a category land in
/// the [`UNCATEGORIZED`] bucket.
///
/// This is a derivation, not stored state: it is recomputed whenever the
/// raw course list changes.
pub fn group_by_category(courses: &[Course]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for course in courses {
        let name = course
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);

        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.courses.push(course.clone()),
            None => groups.push(CategoryGroup {
                name: name.to_string(),
                courses: vec![course.clone()],
            }),
        }
    }

    groups
}
