mod achievements;
mod board;
pub mod effects;
mod exercise;
mod free_play;
mod lessons;
pub(crate) mod live_progress;
mod state;

pub use achievements::AchievementsView;
pub use exercise::ExerciseView;
pub use free_play::FreePlayView;
pub use lessons::LessonsView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
