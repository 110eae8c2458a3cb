use dioxus::prelude::*;
use services::{AchievementError, LessonError, ProgressError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// Backend unreachable and nothing cached.
    Offline,
    NotFound,
    /// The exercise has no interactive board.
    Unavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::Offline => {
                "Could not reach the chess server. Check your connection and try again."
            }
            ViewError::NotFound => "That lesson could not be found.",
            ViewError::Unavailable => "This exercise is not available yet.",
        }
    }
}

impl From<ProgressError> for ViewError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::Api(_) => ViewError::Offline,
            _ => ViewError::Unknown,
        }
    }
}

impl From<LessonError> for ViewError {
    fn from(err: LessonError) -> Self {
        match err {
            LessonError::NotFound(_) => ViewError::NotFound,
            LessonError::NoExercise(_) => ViewError::Unavailable,
            LessonError::Api(_) => ViewError::Offline,
            _ => ViewError::Unknown,
        }
    }
}

impl From<AchievementError> for ViewError {
    fn from(err: AchievementError) -> Self {
        match err {
            AchievementError::Progress(progress) => progress.into(),
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
