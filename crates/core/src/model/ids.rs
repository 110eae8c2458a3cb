use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    #[error("unknown exercise id: {0}")]
    UnknownExercise(String),
    #[error("achievement id must not be empty")]
    EmptyAchievement,
}

/// Numeric lesson identifier as served by `/lessons`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(u32);

impl LessonId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The lesson that must be completed before this one unlocks.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        (self.0 > 1).then(|| Self(self.0 - 1))
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({})", self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// String identifier of an achievement (`first_lesson`, `board_setup`, ...).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementId(String);

impl AchievementId {
    /// # Errors
    ///
    /// Returns `IdError::EmptyAchievement` for blank ids.
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdError::EmptyAchievement);
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AchievementId({})", self.0)
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Interactive exercises known to the backend, keyed by their URL slug.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseId {
    PieceMovement,
    BoardSetup,
    CenterControl,
    PieceDevelopment,
    ForkPractice,
    PinPractice,
}

impl ExerciseId {
    pub const ALL: [ExerciseId; 6] = [
        ExerciseId::PieceMovement,
        ExerciseId::BoardSetup,
        ExerciseId::CenterControl,
        ExerciseId::PieceDevelopment,
        ExerciseId::ForkPractice,
        ExerciseId::PinPractice,
    ];

    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            ExerciseId::PieceMovement => "piece_movement",
            ExerciseId::BoardSetup => "board_setup",
            ExerciseId::CenterControl => "center_control",
            ExerciseId::PieceDevelopment => "piece_development",
            ExerciseId::ForkPractice => "fork_practice",
            ExerciseId::PinPractice => "pin_practice",
        }
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ExerciseId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|id| id.slug() == normalized)
            .ok_or_else(|| IdError::UnknownExercise(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercise_slugs_round_trip_and_accept_dashes() {
        for id in ExerciseId::ALL {
            assert_eq!(id.slug().parse::<ExerciseId>().unwrap(), id);
        }
        assert_eq!(
            "pin-practice".parse::<ExerciseId>().unwrap(),
            ExerciseId::PinPractice
        );
        assert!("basic_tactics".parse::<ExerciseId>().is_err());
    }

    #[test]
    fn first_lesson_has_no_predecessor() {
        assert_eq!(LessonId::new(1).previous(), None);
        assert_eq!(LessonId::new(3).previous(), Some(LessonId::new(2)));
    }

    #[test]
    fn blank_achievement_id_is_rejected() {
        assert_eq!(AchievementId::new("  "), Err(IdError::EmptyAchievement));
        assert_eq!(AchievementId::new("first_pin").unwrap().as_str(), "first_pin");
    }
}
