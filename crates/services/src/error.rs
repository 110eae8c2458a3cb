//! Shared error types for the services crate.

use thiserror::Error;

use chessedu_core::model::{ExerciseId, IdError, LessonId};
use chessedu_core::steps::StepError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the progress HTTP client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("progress api request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("progress api returned malformed json: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AchievementService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AchievementError {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted by `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson {0} not found")]
    NotFound(LessonId),
    #[error("lesson {0} has no interactive exercise")]
    NoExercise(LessonId),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while opening or driving an exercise.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise {0} has no interactive board")]
    Unavailable(ExerciseId),
    #[error(transparent)]
    Step(#[from] StepError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
