//! Course-detail use case implementation.
//!
//! One instance drives the active course-detail session: loading course
//! and progress, enrolling, toggling video completion, signed playback
//! URLs and certificate requests. Opening a course starts a new epoch;
//! every response carries the epoch it was issued under and is dropped on
//! arrival if the user has since navigated elsewhere.

use std::sync::Arc;

use devlaunch_core::api::{CertificateRef, CourseApi};
use devlaunch_core::course::{Course, CourseProgress, Video, is_certificate_eligible, is_playable};
use devlaunch_core::{DevlaunchError, Result};
use tokio::sync::RwLock;

use crate::catalog_usecase::CatalogUseCase;

/// Lifecycle of the active course-detail session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Read-only snapshot of the course-detail state.
#[derive(Debug, Clone, Default)]
pub struct CourseDetailState {
    pub phase: DetailPhase,
    /// Full course detail; immutable once fetched within this session.
    pub course: Option<Course>,
    /// Authoritative progress, replaced wholesale from server responses.
    pub progress: CourseProgress,
    pub selected_video: Option<Video>,
    pub signed_playback_url: Option<String>,
    /// Enrollment predicate for this course, recomputed on load and
    /// flipped optimistically on a successful enroll.
    pub enrolled: bool,
    /// Fatal course-detail fetch failure.
    pub error: Option<String>,
    /// Transient progress/toggle failure; prior progress stays visible.
    pub progress_error: Option<String>,
}

impl CourseDetailState {
    /// Whether the certificate may be requested right now.
    pub fn certificate_eligible(&self) -> bool {
        is_certificate_eligible(self.progress.progress)
    }
}

struct Inner {
    /// Bumped on every open/close; responses from older epochs are
    /// dropped on arrival.
    epoch: u64,
    course_id: Option<String>,
    /// Progress that arrived before the course detail; applied once the
    /// detail lands.
    buffered_progress: Option<CourseProgress>,
    state: CourseDetailState,
}

/// Use case for the active course-detail session.
pub struct CourseUseCase {
    api: Arc<dyn CourseApi>,
    catalog: Arc<CatalogUseCase>,
    inner: RwLock<Inner>,
}

impl CourseUseCase {
    pub fn new(api: Arc<dyn CourseApi>, catalog: Arc<CatalogUseCase>) -> Self {
        Self {
            api,
            catalog,
            inner: RwLock::new(Inner {
                epoch: 0,
                course_id: None,
                buffered_progress: None,
                state: CourseDetailState::default(),
            }),
        }
    }

    /// Returns the current course-detail snapshot.
    pub async fn snapshot(&self) -> CourseDetailState {
        self.inner.read().await.state.clone()
    }

    /// Loads course detail and progress for `course_id`.
    ///
    /// Entering the course first clears any state from a previous one, so
    /// a slow in-flight response for the old course can never populate the
    /// new view. Detail and progress are fetched concurrently and applied
    /// as each arrives; progress arriving first is buffered until the
    /// detail lands. A detail failure is fatal to the session, a progress
    /// failure is not.
    pub async fn load_course(&self, course_id: &str) -> Result<()> {
        let epoch = self.open_course(course_id).await;

        let detail = async {
            let result = self.api.fetch_course(course_id).await;
            self.apply_course_detail(epoch, result).await
        };
        let progress = async {
            let result = self.api.fetch_progress(course_id).await;
            self.apply_progress(epoch, result).await;
        };

        let (detail_outcome, ()) = tokio::join!(detail, progress);
        detail_outcome
    }

    /// Enrolls in the open course.
    ///
    /// A no-op when already enrolled. On success the local enrollment
    /// predicate flips immediately; callers are expected to refetch
    /// progress afterwards.
    pub async fn enroll(&self) -> Result<()> {
        let (course_id, epoch) = self.open_session().await?;
        if self.inner.read().await.state.enrolled {
            tracing::debug!(%course_id, "already enrolled, skipping");
            return Ok(());
        }

        self.api.enroll(&course_id).await?;

        let mut inner = self.inner.write().await;
        if inner.epoch == epoch {
            inner.state.enrolled = true;
        }
        Ok(())
    }

    /// Toggles one video's completion state.
    ///
    /// Gated on enrollment: when not enrolled, no network call is made and
    /// `NotEnrolled` is returned. On success the server's progress
    /// replaces local state wholesale, then a progress refetch is issued
    /// to guarantee convergence even if the toggle response was partial.
    pub async fn toggle_video_completion(&self, video_key: &str) -> Result<()> {
        let (course_id, epoch) = self.open_session().await?;
        if !self.inner.read().await.state.enrolled {
            return Err(DevlaunchError::not_enrolled(course_id));
        }

        match self.api.toggle_video(&course_id, video_key).await {
            Ok(progress) => {
                let applied = self.apply_progress(epoch, Ok(progress)).await;
                if applied {
                    // Mandatory refetch, issued only after the toggle's own
                    // response has been applied.
                    let result = self.api.fetch_progress(&course_id).await;
                    self.apply_progress(epoch, result).await;
                }
                Ok(())
            }
            Err(err) => {
                let mut inner = self.inner.write().await;
                if inner.epoch == epoch {
                    inner.state.progress_error = Some(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Selects a video for preview. Allowed at any time; switching videos
    /// drops the previous signed URL so it cannot be rendered against the
    /// wrong player.
    pub async fn select_video(&self, video: Video) {
        let mut inner = self.inner.write().await;
        let same = inner
            .state
            .selected_video
            .as_ref()
            .is_some_and(|current| current.key == video.key);
        if !same {
            inner.state.signed_playback_url = None;
        }
        inner.state.selected_video = Some(video);
    }

    /// Fetches a signed playback URL for one video. Locked content never
    /// receives a signed URL request.
    pub async fn fetch_signed_playback_url(&self, video_key: &str) -> Result<String> {
        let (course_id, epoch) = self.open_session().await?;
        if !is_playable(self.inner.read().await.state.enrolled) {
            return Err(DevlaunchError::not_enrolled(course_id));
        }

        let url = self.api.signed_video_url(&course_id, video_key).await?;

        let mut inner = self.inner.write().await;
        if inner.epoch == epoch {
            inner.state.signed_playback_url = Some(url.clone());
        }
        Ok(url)
    }

    /// Requests the course certificate. Rejected locally, without a
    /// network call, while progress is below 100%.
    pub async fn request_certificate(&self) -> Result<CertificateRef> {
        let (course_id, _epoch) = self.open_session().await?;
        let progress = self.inner.read().await.state.progress.progress;
        if !is_certificate_eligible(progress) {
            return Err(DevlaunchError::CertificateLocked { progress });
        }

        self.api.generate_certificate(&course_id).await
    }

    /// Refetches progress for the open course; failures are transient.
    pub async fn refresh_progress(&self) -> Result<()> {
        let (course_id, epoch) = self.open_session().await?;
        let result = self.api.fetch_progress(&course_id).await;
        let failed = result.is_err();
        self.apply_progress(epoch, result).await;
        if failed {
            tracing::debug!(%course_id, "progress refresh failed, keeping prior state");
        }
        Ok(())
    }

    /// Abandons the current course-detail session. Late responses for it
    /// are dropped on arrival.
    pub async fn close_course(&self) {
        let mut inner = self.inner.write().await;
        inner.epoch += 1;
        inner.course_id = None;
        inner.buffered_progress = None;
        inner.state = CourseDetailState::default();
    }

    /// Starts a new epoch for `course_id`, clearing all previous state,
    /// and seeds the enrollment predicate from the catalog.
    async fn open_course(&self, course_id: &str) -> u64 {
        let enrolled = self.catalog.is_enrolled(course_id).await;

        let mut inner = self.inner.write().await;
        inner.epoch += 1;
        inner.course_id = Some(course_id.to_string());
        inner.buffered_progress = None;
        inner.state = CourseDetailState {
            phase: DetailPhase::Loading,
            enrolled,
            ..CourseDetailState::default()
        };
        inner.epoch
    }

    async fn open_session(&self) -> Result<(String, u64)> {
        let inner = self.inner.read().await;
        let course_id = inner
            .course_id
            .clone()
            .ok_or_else(|| DevlaunchError::internal("no course-detail session open"))?;
        Ok((course_id, inner.epoch))
    }

    /// Applies a course-detail response issued under `epoch`.
    async fn apply_course_detail(&self, epoch: u64, result: Result<Course>) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.epoch != epoch {
            tracing::debug!("stale course-detail response discarded");
            return Ok(());
        }

        match result {
            Ok(course) => {
                inner.state.selected_video = course.videos.first().cloned();
                inner.state.course = Some(course);
                inner.state.phase = DetailPhase::Ready;
                inner.state.error = None;
                if let Some(progress) = inner.buffered_progress.take() {
                    inner.state.progress = progress;
                }
                Ok(())
            }
            Err(err) => {
                inner.state.phase = DetailPhase::Failed;
                inner.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Applies a progress response issued under `epoch`. Returns whether
    /// the response was admitted (current epoch). Progress is only
    /// meaningful once course detail is present; earlier arrivals are
    /// buffered.
    async fn apply_progress(&self, epoch: u64, result: Result<CourseProgress>) -> bool {
        let mut inner = self.inner.write().await;
        if inner.epoch != epoch {
            tracing::debug!("stale progress response discarded");
            return false;
        }

        match result {
            Ok(progress) => {
                if inner.state.course.is_some() {
                    inner.state.progress = progress;
                } else {
                    inner.buffered_progress = Some(progress);
                }
                inner.state.progress_error = None;
                true
            }
            Err(err) => {
                inner.state.progress_error = Some(err.to_string());
                false
            }
        }
    }
}
