mod ids;
mod lesson;
mod progress;

pub use ids::{AchievementId, ExerciseId, IdError, LessonId};
pub use lesson::{Lesson, LessonStatus};
pub use progress::{EarnedAchievement, ProgressSnapshot, objective_key};
