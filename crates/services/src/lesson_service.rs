use std::sync::Arc;

use chessedu_core::exercises;
use chessedu_core::model::{ExerciseId, Lesson, LessonId, LessonStatus, ProgressSnapshot};
use tracing::warn;

use crate::api::ProgressApi;
use crate::error::LessonError;
use crate::progress_service::{LoadedProgress, ProgressService};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonEntry {
    pub lesson: Lesson,
    pub status: LessonStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonOverview {
    pub lessons: Vec<LessonEntry>,
    /// `None` when progress could not be loaded; lessons then show as if
    /// nothing was completed.
    pub progress: Option<LoadedProgress>,
}

#[derive(Clone)]
pub struct LessonService {
    api: Arc<dyn ProgressApi>,
    progress: Arc<ProgressService>,
}

impl LessonService {
    #[must_use]
    pub fn new(api: Arc<dyn ProgressApi>, progress: Arc<ProgressService>) -> Self {
        Self { api, progress }
    }

    /// Lessons sorted by id, each with its lock status.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Api` if the lesson list cannot be fetched. A
    /// progress failure alone is not an error.
    pub async fn list(&self) -> Result<LessonOverview, LessonError> {
        let mut lessons = self.api.list_lessons().await?;
        lessons.sort_by_key(|lesson| lesson.id);

        let progress = match self.progress.load().await {
            Ok(progress) => Some(progress),
            Err(err) => {
                warn!(error = %err, "listing lessons without progress");
                None
            }
        };
        let empty = ProgressSnapshot::default();
        let snapshot = progress.as_ref().map_or(&empty, |p| &p.snapshot);

        let lessons = lessons
            .into_iter()
            .map(|lesson| LessonEntry {
                status: LessonStatus::for_lesson(lesson.id, snapshot),
                lesson,
            })
            .collect();
        Ok(LessonOverview { lessons, progress })
    }

    /// # Errors
    ///
    /// Returns `LessonError::NotFound` for unknown ids, `LessonError::Api`
    /// for transport failures.
    pub async fn lesson(&self, id: LessonId) -> Result<Lesson, LessonError> {
        self.api
            .get_lesson(id)
            .await?
            .ok_or(LessonError::NotFound(id))
    }

    /// The exercise "Start lesson" opens: the first one this client has a
    /// board for.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::NoExercise` when none of the lesson's exercises
    /// is playable, plus any `lesson` error.
    pub async fn first_exercise(&self, id: LessonId) -> Result<ExerciseId, LessonError> {
        let lesson = self.lesson(id).await?;
        lesson
            .exercises()
            .find(|exercise| exercises::exercise(*exercise).is_some())
            .ok_or(LessonError::NoExercise(id))
    }
}
