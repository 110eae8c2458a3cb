use serde::{Deserialize, Serialize};

use crate::model::{AchievementId, LessonId};

/// An achievement as listed by the server inside a progress snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedAchievement {
    pub id: AchievementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EarnedAchievement {
    #[must_use]
    pub fn new(id: AchievementId) -> Self {
        Self {
            id,
            title: None,
            description: None,
        }
    }
}

/// Server-owned learner progress. The client never computes it on its own;
/// it is re-fetched after every mutation.
///
/// Unknown fields (the backend also ships a camelCase `completedLessons`
/// mirror) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub completed_lessons: Vec<LessonId>,
    #[serde(default)]
    pub achievements: Vec<EarnedAchievement>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default, alias = "completedObjectives")]
    pub completed_objectives: Vec<String>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn has_completed(&self, lesson: LessonId) -> bool {
        self.completed_lessons.contains(&lesson)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_lessons.len()
    }

    #[must_use]
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id.as_str() == id)
    }

    /// Objectives are keyed `"{lesson}_{index}"`.
    #[must_use]
    pub fn has_objective(&self, lesson: LessonId, index: usize) -> bool {
        let key = objective_key(lesson, index);
        self.completed_objectives.iter().any(|k| *k == key)
    }

    pub fn achievement_ids(&self) -> impl Iterator<Item = &AchievementId> {
        self.achievements.iter().map(|a| &a.id)
    }
}

#[must_use]
pub fn objective_key(lesson: LessonId, index: usize) -> String {
    format!("{}_{index}", lesson.value())
}
