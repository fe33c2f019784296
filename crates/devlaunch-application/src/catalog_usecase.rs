//! Catalog use case implementation.
//!
//! Keeps the course catalog and the user's enrollments in sync with the
//! server. Search responses can arrive out of order; each request carries
//! a sequence token and a response is applied only if it is newer than
//! everything applied so far. Failures keep the previous (stale but valid)
//! result set visible and raise an error flag instead of blanking the
//! view.
//!
//! Debouncing keystroke-driven queries is the caller's concern; the
//! correctness of the final state never depends on it.

use std::sync::{Arc, Mutex};

use devlaunch_core::Result;
use devlaunch_core::api::CourseApi;
use devlaunch_core::course::{CategoryGroup, Course, CoursePage, EnrolledCourse, group_by_category};
use devlaunch_core::sequence::StaleGuard;
use tokio::sync::RwLock;

/// Read-only snapshot of the catalog state.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Last successfully applied search result.
    pub courses: Vec<Course>,
    /// Derived grouping of `courses`, recomputed on every change.
    pub grouped: Vec<CategoryGroup>,
    /// The user's enrollments, replaced wholesale on each fetch.
    pub enrolled: Vec<EnrolledCourse>,
    /// Set when the latest search failed; prior results stay visible.
    pub search_error: Option<String>,
    /// Set when the latest enrollment fetch failed.
    pub enrolled_error: Option<String>,
}

/// Use case for catalog search and the enrollment list.
pub struct CatalogUseCase {
    api: Arc<dyn CourseApi>,
    state: RwLock<CatalogState>,
    search_guard: Mutex<StaleGuard>,
}

impl CatalogUseCase {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self {
            api,
            state: RwLock::new(CatalogState::default()),
            search_guard: Mutex::new(StaleGuard::new()),
        }
    }

    /// Returns the current catalog snapshot.
    pub async fn snapshot(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    /// Searches the catalog. The response replaces the course list
    /// wholesale unless a newer search has already been applied, in which
    /// case it is discarded on arrival.
    pub async fn search(&self, query: &str, page: u32, limit: u32) -> Result<()> {
        let seq = self.issue_search();
        let result = self.api.search_courses(query, page, limit).await;
        self.apply_search(seq, result).await
    }

    /// Replaces the enrollment list from `GET /user/me/courses`.
    pub async fn fetch_enrolled(&self) -> Result<()> {
        match self.api.my_courses().await {
            Ok(enrolled) => {
                let mut state = self.state.write().await;
                state.enrolled = enrolled;
                state.enrolled_error = None;
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.enrolled_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Whether the user is enrolled in the given course.
    ///
    /// Recomputed by scanning the enrollment list every time, matching the
    /// server's notion rather than caching a boolean that could go stale.
    pub async fn is_enrolled(&self, course_id: &str) -> bool {
        self.state
            .read()
            .await
            .enrolled
            .iter()
            .any(|enrollment| enrollment.course.id == course_id)
    }

    fn issue_search(&self) -> u64 {
        self.search_guard.lock().unwrap().issue()
    }

    async fn apply_search(&self, seq: u64, result: Result<CoursePage>) -> Result<()> {
        // State lock taken before the admit decision so the check and the
        // update are one atomic step with respect to other completions.
        // Failures go through the same admit gate as successes: an error
        // from a superseded search must not overlay a newer result.
        let mut state = self.state.write().await;
        if !self.search_guard.lock().unwrap().admit(seq) {
            tracing::debug!(seq, "stale search response discarded");
            return Ok(());
        }
        match result {
            Ok(page) => {
                state.courses = page.courses;
                state.grouped = group_by_category(&state.courses);
                state.search_error = None;
                Ok(())
            }
            Err(err) => {
                state.search_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
