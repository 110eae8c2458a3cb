#![forbid(unsafe_code)]

pub mod achievement_service;
pub mod api;
pub mod app_services;
pub mod error;
pub mod exercise_runner;
pub mod lesson_service;
pub mod progress_service;

pub use chessedu_core::Clock;

pub use achievement_service::{AchievementOverview, AchievementService, AwardOutcome};
pub use api::{ApiConfig, ExerciseAck, HttpProgressApi, ProgressApi};
pub use app_services::AppServices;
pub use error::{
    AchievementError, ApiError, AppServicesError, ExerciseError, LessonError, ProgressError,
};
pub use exercise_runner::{
    Celebrations, CompletionFailure, CompletionReport, CompletionTask, ExerciseCapabilities,
    ExerciseRunner, NextStep,
};
pub use lesson_service::{LessonEntry, LessonOverview, LessonService};
pub use progress_service::{LoadedProgress, ProgressService, ProgressSource};
