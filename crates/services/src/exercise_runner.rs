//! Drives one guided exercise and fires its optional side effects.

use std::sync::Arc;

use chessedu_core::achievement::AchievementDefinition;
use chessedu_core::board::{Piece, Square};
use chessedu_core::exercises::{self, CompletionPlan, ExerciseInfo};
use chessedu_core::model::{ExerciseId, ProgressSnapshot};
use chessedu_core::steps::{Advance, DropOutcome, GuidedSequence, StepDefinition, Verification};
use tracing::{debug, error};

use crate::achievement_service::{AchievementService, AwardOutcome};
use crate::error::{AchievementError, ExerciseError, ProgressError};
use crate::progress_service::ProgressService;

/// Presentation hooks fired by engine outcomes.
pub trait Celebrations: Send + Sync {
    fn step_completed(&self, step: usize, title: &str);
    fn verification_failed(&self);
    fn exercise_completed(&self, title: &str);
    fn achievement_unlocked(&self, definition: &'static AchievementDefinition);
}

/// Optional collaborators of an exercise. A missing one silently skips
/// the matching side effect.
#[derive(Clone, Default)]
pub struct ExerciseCapabilities {
    pub celebrations: Option<Arc<dyn Celebrations>>,
    pub achievements: Option<Arc<AchievementService>>,
    pub progress: Option<Arc<ProgressService>>,
}

pub enum NextStep {
    Moved(usize),
    Blocked,
    AlreadyFinished,
    /// The last step was passed; run the task to report completion.
    Finished(CompletionTask),
}

pub struct ExerciseRunner {
    info: ExerciseInfo,
    sequence: GuidedSequence,
    capabilities: ExerciseCapabilities,
}

impl ExerciseRunner {
    /// # Errors
    ///
    /// Returns `ExerciseError::Unavailable` for exercises without a board,
    /// `ExerciseError::Step` if the first step cannot be loaded.
    pub fn start(id: ExerciseId, capabilities: ExerciseCapabilities) -> Result<Self, ExerciseError> {
        let exercise = exercises::exercise(id).ok_or(ExerciseError::Unavailable(id))?;
        let info = exercise.info;
        let sequence = exercise.start()?;
        debug!(exercise = %id, steps = sequence.total(), "exercise started");
        Ok(Self {
            info,
            sequence,
            capabilities,
        })
    }

    #[must_use]
    pub fn info(&self) -> &ExerciseInfo {
        &self.info
    }

    #[must_use]
    pub fn sequence(&self) -> &GuidedSequence {
        &self.sequence
    }

    #[must_use]
    pub fn current_step(&self) -> &StepDefinition {
        self.sequence.current_step()
    }

    pub fn drop_piece(&mut self, from: Square, to: Square) -> DropOutcome {
        let outcome = self.sequence.drop_piece(from, to);
        self.celebrate_drop(&outcome);
        outcome
    }

    pub fn place_piece(&mut self, square: Square, piece: Piece) -> DropOutcome {
        let outcome = self.sequence.place_piece(square, piece);
        self.celebrate_drop(&outcome);
        outcome
    }

    pub fn remove_piece(&mut self, square: Square) -> DropOutcome {
        let outcome = self.sequence.remove_piece(square);
        self.celebrate_drop(&outcome);
        outcome
    }

    pub fn verify(&mut self) -> Verification {
        let verification = self.sequence.verify_current();
        match &verification {
            Verification::Completed { step } => self.celebrate_step(*step),
            Verification::Incomplete | Verification::Inconclusive(_) => {
                if let Some(hooks) = &self.capabilities.celebrations {
                    hooks.verification_failed();
                }
            }
            Verification::AlreadyComplete | Verification::Partial { .. } => {}
        }
        if let Verification::Inconclusive(err) = &verification {
            error!(exercise = %self.info.id, error = %err, "step check could not be evaluated");
        }
        verification
    }

    /// # Errors
    ///
    /// Returns `ExerciseError::Step` for an unknown index or a finished exercise.
    pub fn go_to_step(&mut self, index: usize) -> Result<&StepDefinition, ExerciseError> {
        Ok(self.sequence.go_to_step(index)?)
    }

    /// # Errors
    ///
    /// Returns `ExerciseError::Step` if the previous step cannot be loaded.
    pub fn previous(&mut self) -> Result<Option<usize>, ExerciseError> {
        Ok(self.sequence.go_to_previous()?)
    }

    /// # Errors
    ///
    /// Returns `ExerciseError::Step` after completion or for a malformed position.
    pub fn reset_board(&mut self) -> Result<(), ExerciseError> {
        Ok(self.sequence.reset_board()?)
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        self.sequence.hint()
    }

    /// # Errors
    ///
    /// Returns `ExerciseError::Step` if the next step cannot be loaded.
    pub fn next(&mut self) -> Result<NextStep, ExerciseError> {
        Ok(match self.sequence.go_to_next()? {
            Advance::Moved(index) => NextStep::Moved(index),
            Advance::Blocked => NextStep::Blocked,
            Advance::AlreadyFinished => NextStep::AlreadyFinished,
            Advance::Finished => {
                debug!(exercise = %self.info.id, "exercise finished");
                if let Some(hooks) = &self.capabilities.celebrations {
                    hooks.exercise_completed(self.info.title);
                }
                NextStep::Finished(CompletionTask {
                    exercise: self.info.id,
                    plan: self.info.on_complete,
                    capabilities: self.capabilities.clone(),
                })
            }
        })
    }

    fn celebrate_drop(&self, outcome: &DropOutcome) {
        match outcome {
            DropOutcome::Accepted {
                verification: Verification::Completed { step },
                ..
            } => self.celebrate_step(*step),
            DropOutcome::Undone { .. } => {
                if let Some(hooks) = &self.capabilities.celebrations {
                    hooks.verification_failed();
                }
            }
            _ => {}
        }
    }

    fn celebrate_step(&self, step: usize) {
        if let Some(hooks) = &self.capabilities.celebrations {
            let title = self.sequence.steps()[step].title;
            hooks.step_completed(step, title);
        }
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum CompletionFailure {
    Lesson(ProgressError),
    Exercise(ProgressError),
    Award(AchievementError),
}

#[derive(Debug, Default)]
pub struct CompletionReport {
    pub awarded: Option<&'static AchievementDefinition>,
    pub snapshot: Option<ProgressSnapshot>,
    pub failures: Vec<CompletionFailure>,
}

/// Owned completion work, detached from the runner so no exercise state
/// is held across the network calls.
pub struct CompletionTask {
    exercise: ExerciseId,
    plan: CompletionPlan,
    capabilities: ExerciseCapabilities,
}

impl CompletionTask {
    #[must_use]
    pub fn plan(&self) -> CompletionPlan {
        self.plan
    }

    /// Runs every reporting step; a failing step does not stop the others.
    pub async fn run(self) -> CompletionReport {
        let mut report = CompletionReport::default();

        if let Some(progress) = &self.capabilities.progress {
            if let Some(lesson) = self.plan.complete_lesson {
                match progress.complete_lesson(lesson).await {
                    Ok(snapshot) => report.snapshot = Some(snapshot),
                    Err(err) => report.failures.push(CompletionFailure::Lesson(err)),
                }
            }
            if self.plan.report_exercise {
                match progress.complete_exercise(self.exercise).await {
                    Ok(snapshot) => report.snapshot = Some(snapshot),
                    Err(err) => report.failures.push(CompletionFailure::Exercise(err)),
                }
            }
        }

        if let (Some(id), Some(achievements)) = (self.plan.award, &self.capabilities.achievements) {
            match achievements.award(id).await {
                Ok(AwardOutcome::Awarded {
                    definition,
                    snapshot,
                }) => {
                    if let Some(hooks) = &self.capabilities.celebrations {
                        hooks.achievement_unlocked(definition);
                    }
                    report.awarded = Some(definition);
                    report.snapshot = Some(snapshot);
                }
                Ok(AwardOutcome::AlreadyEarned | AwardOutcome::Unknown) => {}
                Err(err) => {
                    error!(exercise = %self.exercise, error = %err, "achievement award failed");
                    report.failures.push(CompletionFailure::Award(err));
                }
            }
        }

        report
    }
}
