use std::sync::Arc;

use chessedu_core::Clock;
use chessedu_core::model::{AchievementId, ExerciseId, LessonId, ProgressSnapshot};
use chrono::{DateTime, Utc};
use storage::repository::ProgressMirrorRepository;
use tracing::{debug, error, warn};

use crate::api::ProgressApi;
use crate::error::{ApiError, ProgressError};

/// Where a loaded snapshot came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressSource {
    Server,
    /// Server unreachable; last mirrored snapshot shown instead.
    Mirror { saved_at: DateTime<Utc> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedProgress {
    pub snapshot: ProgressSnapshot,
    pub source: ProgressSource,
}

impl LoadedProgress {
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self.source, ProgressSource::Mirror { .. })
    }
}

/// Reports completions to the backend and keeps the local mirror in step
/// with every snapshot the server returns.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    api: Arc<dyn ProgressApi>,
    mirror: Arc<dyn ProgressMirrorRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        api: Arc<dyn ProgressApi>,
        mirror: Arc<dyn ProgressMirrorRepository>,
    ) -> Self {
        Self { clock, api, mirror }
    }

    /// Fetch the server snapshot, falling back to the mirror when the
    /// server cannot be reached.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Api` when the server fails and nothing was
    /// ever mirrored.
    pub async fn load(&self) -> Result<LoadedProgress, ProgressError> {
        match self.api.fetch_progress().await {
            Ok(snapshot) => {
                self.remember(&snapshot).await;
                Ok(LoadedProgress {
                    snapshot,
                    source: ProgressSource::Server,
                })
            }
            Err(err) => self.fall_back(err).await,
        }
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Api` if the server rejects or cannot be reached.
    pub async fn complete_lesson(&self, lesson: LessonId) -> Result<ProgressSnapshot, ProgressError> {
        let snapshot = self
            .api
            .complete_lesson(lesson, self.clock.now())
            .await
            .inspect_err(|err| error!(%lesson, error = %err, "complete lesson failed"))?;
        debug!(%lesson, completed = snapshot.completed_count(), "lesson completed");
        self.remember(&snapshot).await;
        Ok(snapshot)
    }

    /// Reports a finished exercise. When the server's reply carries no
    /// progress, the snapshot is re-fetched.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Api` if either request fails.
    pub async fn complete_exercise(
        &self,
        exercise: ExerciseId,
    ) -> Result<ProgressSnapshot, ProgressError> {
        let ack = self
            .api
            .complete_exercise(exercise)
            .await
            .inspect_err(|err| error!(%exercise, error = %err, "complete exercise failed"))?;
        let snapshot = match ack.progress {
            Some(snapshot) => snapshot,
            None => self.api.fetch_progress().await?,
        };
        debug!(%exercise, "exercise reported");
        self.remember(&snapshot).await;
        Ok(snapshot)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Api` if the server rejects or cannot be reached.
    pub async fn add_achievement(
        &self,
        id: &AchievementId,
    ) -> Result<ProgressSnapshot, ProgressError> {
        let snapshot = self
            .api
            .add_achievement(id)
            .await
            .inspect_err(|err| error!(achievement = %id, error = %err, "add achievement failed"))?;
        self.remember(&snapshot).await;
        Ok(snapshot)
    }

    // Mirror writes never fail the caller.
    async fn remember(&self, snapshot: &ProgressSnapshot) {
        if let Err(err) = self.mirror.save_snapshot(snapshot, self.clock.now()).await {
            warn!(error = %err, "could not mirror progress snapshot");
        }
    }

    async fn fall_back(&self, api_err: ApiError) -> Result<LoadedProgress, ProgressError> {
        match self.mirror.load_snapshot().await {
            Ok(Some(mirrored)) => {
                warn!(error = %api_err, saved_at = %mirrored.saved_at, "progress api unavailable, using mirror");
                Ok(LoadedProgress {
                    snapshot: mirrored.snapshot,
                    source: ProgressSource::Mirror {
                        saved_at: mirrored.saved_at,
                    },
                })
            }
            Ok(None) => {
                error!(error = %api_err, "progress api unavailable and nothing mirrored");
                Err(api_err.into())
            }
            Err(storage_err) => {
                warn!(error = %storage_err, "progress mirror unreadable");
                Err(api_err.into())
            }
        }
    }
}
