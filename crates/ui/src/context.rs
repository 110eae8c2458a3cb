use std::sync::Arc;

use services::{
    AchievementService, Celebrations, ExerciseCapabilities, LessonService, ProgressService,
};

pub trait UiApp: Send + Sync {
    fn lessons(&self) -> Arc<LessonService>;
    fn achievements(&self) -> Arc<AchievementService>;
    fn progress(&self) -> Arc<ProgressService>;
}

#[derive(Clone)]
pub struct AppContext {
    lessons: Arc<LessonService>,
    achievements: Arc<AchievementService>,
    progress: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            lessons: app.lessons(),
            achievements: app.achievements(),
            progress: app.progress(),
        }
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn achievements(&self) -> Arc<AchievementService> {
        Arc::clone(&self.achievements)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    /// Collaborators handed to an exercise view; celebrations go to `sink`.
    #[must_use]
    pub fn exercise_capabilities(&self, sink: Arc<dyn Celebrations>) -> ExerciseCapabilities {
        ExerciseCapabilities {
            celebrations: Some(sink),
            achievements: Some(self.achievements()),
            progress: Some(self.progress()),
        }
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
