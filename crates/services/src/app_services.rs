use std::sync::Arc;

use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::achievement_service::AchievementService;
use crate::api::{ApiConfig, HttpProgressApi, ProgressApi};
use crate::error::AppServicesError;
use crate::exercise_runner::{Celebrations, ExerciseCapabilities};
use crate::lesson_service::LessonService;
use crate::progress_service::ProgressService;

/// Assembles app-facing services around one API client and one mirror.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
    achievements: Arc<AchievementService>,
    lessons: Arc<LessonService>,
}

impl AppServices {
    /// Build services backed by the HTTP backend and a `SQLite` mirror.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// HTTP client cannot be built.
    pub async fn new_sqlite(
        db_url: &str,
        api: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        info!(api = %api.base_url, "progress api configured");
        let api: Arc<dyn ProgressApi> = Arc::new(HttpProgressApi::new(api)?);
        Ok(Self::with_api(api, &storage, clock))
    }

    /// Wire services around an existing API client and storage.
    #[must_use]
    pub fn with_api(api: Arc<dyn ProgressApi>, storage: &Storage, clock: Clock) -> Self {
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&api),
            Arc::clone(&storage.progress_mirror),
        ));
        let achievements = Arc::new(AchievementService::new(Arc::clone(&progress)));
        let lessons = Arc::new(LessonService::new(Arc::clone(&api), Arc::clone(&progress)));
        Self {
            progress,
            achievements,
            lessons,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn achievements(&self) -> Arc<AchievementService> {
        Arc::clone(&self.achievements)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    /// Every collaborator an exercise can use, with the given presentation hooks.
    #[must_use]
    pub fn exercise_capabilities(
        &self,
        celebrations: Option<Arc<dyn Celebrations>>,
    ) -> ExerciseCapabilities {
        ExerciseCapabilities {
            celebrations,
            achievements: Some(self.achievements()),
            progress: Some(self.progress()),
        }
    }
}
