use chessedu_core::model::LessonStatus;
use services::{LessonEntry, LoadedProgress, ProgressSource};

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCardVm {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub content: String,
    pub objectives: Vec<String>,
    pub status_label: &'static str,
    pub status_class: &'static str,
    /// Button text: completed lessons are reviewed rather than started.
    pub action_label: &'static str,
    pub locked: bool,
}

impl From<&LessonEntry> for LessonCardVm {
    fn from(entry: &LessonEntry) -> Self {
        let (status_class, action_label) = match entry.status {
            LessonStatus::Completed => ("lesson-card completed", "Review"),
            LessonStatus::Available => ("lesson-card available", "Start"),
            LessonStatus::Locked => ("lesson-card locked", "Locked"),
        };
        Self {
            id: entry.lesson.id.value(),
            title: entry.lesson.title.clone(),
            description: entry.lesson.description.clone(),
            content: entry.lesson.content.clone(),
            objectives: entry.lesson.objectives.clone(),
            status_label: entry.status.label(),
            status_class,
            action_label,
            locked: entry.status == LessonStatus::Locked,
        }
    }
}

#[must_use]
pub fn map_lesson_cards(entries: &[LessonEntry]) -> Vec<LessonCardVm> {
    entries.iter().map(LessonCardVm::from).collect()
}

/// Summary line shown above lists that depend on progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressBannerVm {
    pub completed: usize,
    pub streak: u32,
    /// Set when the numbers come from the local mirror.
    pub stale_since: Option<String>,
}

impl From<&LoadedProgress> for ProgressBannerVm {
    fn from(progress: &LoadedProgress) -> Self {
        let stale_since = match progress.source {
            ProgressSource::Server => None,
            ProgressSource::Mirror { saved_at } => Some(format_datetime(saved_at)),
        };
        Self {
            completed: progress.snapshot.completed_count(),
            streak: progress.snapshot.current_streak,
            stale_since,
        }
    }
}
