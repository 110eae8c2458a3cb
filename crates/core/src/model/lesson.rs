use serde::{Deserialize, Serialize};

use crate::model::{ExerciseId, LessonId, ProgressSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub interactive_exercises: Vec<String>,
}

impl Lesson {
    /// Exercise slugs this client recognises, in the order the server lists them.
    pub fn exercises(&self) -> impl Iterator<Item = ExerciseId> + '_ {
        self.interactive_exercises
            .iter()
            .filter_map(|slug| slug.parse().ok())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonStatus {
    Completed,
    Available,
    Locked,
}

impl LessonStatus {
    /// A lesson is locked until the lesson before it has been completed.
    #[must_use]
    pub fn for_lesson(id: LessonId, progress: &ProgressSnapshot) -> Self {
        if progress.has_completed(id) {
            return Self::Completed;
        }
        match id.previous() {
            Some(previous) if !progress.has_completed(previous) => Self::Locked,
            _ => Self::Available,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            LessonStatus::Completed => "Completed",
            LessonStatus::Available => "Available",
            LessonStatus::Locked => "Locked",
        }
    }
}
