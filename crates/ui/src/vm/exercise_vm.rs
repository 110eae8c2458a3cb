use chessedu_core::board::{Piece, Square};
use chessedu_core::exercises::ExerciseInfo;
use chessedu_core::model::ExerciseId;
use chessedu_core::steps::{DropOutcome, Interaction, StepDefinition, Verification};
use services::{CompletionTask, ExerciseCapabilities, ExerciseRunner, NextStep};
use tracing::warn;

use crate::views::ViewError;
use crate::vm::board_vm::{BoardVm, TrayPieceVm, build_board, spare_pieces};
use crate::vm::effects_vm::NotificationKind;

pub const ALREADY_COMPLETE: &str =
    "This step is already complete. You can proceed to the next one.";
pub const NOT_QUITE: &str = "Not quite right. Check the instructions and try again.";
pub const WRONG_MOVE: &str =
    "That move doesn't accomplish the task for this step. Try again or check the hint.";
pub const UNCHECKABLE: &str = "This step could not be checked. Reset the board and try again.";
pub const NO_HINT: &str = "No hint for this step.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardIntent {
    Square(Square),
    Tray(Piece),
    Trash,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseIntent {
    Board(BoardIntent),
    Check,
    Next,
    Previous,
    GoTo(usize),
    Reset,
    Hint,
}

pub enum ExerciseOutcome {
    Continue,
    Finished(CompletionTask),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub kind: NotificationKind,
    pub text: String,
}

impl Feedback {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            text: text.into(),
        }
    }
}

#[must_use]
pub fn step_intro(index: usize, step: &StepDefinition) -> String {
    format!("Step {}: {}. {}", index + 1, step.title, step.first_task())
}

#[must_use]
pub fn finished_message(title: &str) -> String {
    format!("Congratulations! You have completed the {title} exercise!")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepButtonVm {
    pub index: usize,
    pub label: String,
    pub current: bool,
    pub completed: bool,
}

impl StepButtonVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match (self.current, self.completed) {
            (true, _) => "step-button current",
            (false, true) => "step-button completed",
            (false, false) => "step-button",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepPanelVm {
    pub heading: String,
    pub description: &'static str,
    pub instructions: Option<&'static str>,
    pub tasks: &'static [&'static str],
    pub percent: u32,
    pub next_enabled: bool,
    pub finished: bool,
    pub can_check: bool,
    pub buttons: Vec<StepButtonVm>,
}

/// One running exercise: the runner plus board selection and the latest
/// feedback line.
pub struct ExerciseVm {
    runner: ExerciseRunner,
    selected: Option<Square>,
    tray: Option<Piece>,
    feedback: Feedback,
}

impl ExerciseVm {
    /// # Errors
    ///
    /// Returns `ViewError::Unavailable` when the exercise has no board.
    pub fn start(id: ExerciseId, capabilities: ExerciseCapabilities) -> Result<Self, ViewError> {
        let runner = ExerciseRunner::start(id, capabilities).map_err(|err| {
            warn!(exercise = %id, error = %err, "exercise cannot start");
            ViewError::Unavailable
        })?;
        let feedback = Feedback::info(step_intro(0, runner.current_step()));
        Ok(Self {
            runner,
            selected: None,
            tray: None,
            feedback,
        })
    }

    #[must_use]
    pub fn info(&self) -> &ExerciseInfo {
        self.runner.info()
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    #[must_use]
    pub fn board(&self) -> BoardVm {
        build_board(self.runner.sequence(), self.selected)
    }

    #[must_use]
    pub fn tray(&self) -> Vec<TrayPieceVm> {
        spare_pieces(self.tray)
    }

    #[must_use]
    pub fn panel(&self) -> StepPanelVm {
        let sequence = self.runner.sequence();
        let index = sequence.current_index();
        let step = sequence.current_step();
        StepPanelVm {
            heading: format!("Step {} of {}: {}", index + 1, sequence.total(), step.title),
            description: step.description,
            instructions: step.instructions,
            tasks: step.tasks,
            percent: sequence.progress().percent(),
            next_enabled: sequence.next_enabled(),
            finished: sequence.is_finished(),
            can_check: !sequence.is_finished() && !step.check.judges_moves(),
            buttons: sequence
                .steps()
                .iter()
                .enumerate()
                .map(|(i, _)| StepButtonVm {
                    index: i,
                    label: (i + 1).to_string(),
                    current: i == index,
                    completed: sequence.is_completed(i),
                })
                .collect(),
        }
    }

    pub fn apply(&mut self, intent: ExerciseIntent) -> ExerciseOutcome {
        match intent {
            ExerciseIntent::Board(board) => self.board_intent(board),
            ExerciseIntent::Check => {
                let verification = self.runner.verify();
                self.feedback = match verification {
                    Verification::Completed { step } => Feedback::success(format!(
                        "Correct! You've completed Step {}: {}.",
                        step + 1,
                        self.runner.current_step().title
                    )),
                    other => self.verification_feedback(&other),
                };
            }
            ExerciseIntent::Next => return self.next(),
            ExerciseIntent::Previous => match self.runner.previous() {
                Ok(Some(index)) => self.enter_step(index),
                Ok(None) => {}
                Err(err) => self.report(&err),
            },
            ExerciseIntent::GoTo(index) => match self.runner.go_to_step(index) {
                Ok(_) => self.enter_step(index),
                Err(err) => self.report(&err),
            },
            ExerciseIntent::Reset => match self.runner.reset_board() {
                Ok(()) => {
                    self.clear_selection();
                    self.feedback = Feedback::info(format!(
                        "Board reset. {}",
                        self.runner.current_step().first_task()
                    ));
                }
                Err(err) => self.report(&err),
            },
            ExerciseIntent::Hint => {
                self.feedback = Feedback::info(self.runner.hint().unwrap_or(NO_HINT));
            }
        }
        ExerciseOutcome::Continue
    }

    fn next(&mut self) -> ExerciseOutcome {
        match self.runner.next() {
            Ok(NextStep::Moved(index)) => self.enter_step(index),
            Ok(NextStep::Blocked) => self.feedback = Feedback::warning(NOT_QUITE),
            Ok(NextStep::AlreadyFinished) => {}
            Ok(NextStep::Finished(task)) => {
                self.clear_selection();
                self.feedback = Feedback::success(finished_message(self.info().title));
                return ExerciseOutcome::Finished(task);
            }
            Err(err) => self.report(&err),
        }
        ExerciseOutcome::Continue
    }

    fn enter_step(&mut self, index: usize) {
        self.clear_selection();
        self.feedback = Feedback::info(step_intro(index, self.runner.current_step()));
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.tray = None;
    }

    fn report(&mut self, err: &dyn std::error::Error) {
        warn!(exercise = %self.info().id, error = %err, "exercise action failed");
        self.feedback = Feedback {
            kind: NotificationKind::Error,
            text: err.to_string(),
        };
    }

    fn board_intent(&mut self, intent: BoardIntent) {
        let interaction = self.runner.sequence().interaction();
        match intent {
            BoardIntent::Tray(piece) if interaction == Interaction::Setup => {
                self.selected = None;
                self.tray = (self.tray != Some(piece)).then_some(piece);
            }
            BoardIntent::Trash if interaction == Interaction::Setup => {
                if let Some(square) = self.selected.take() {
                    let outcome = self.runner.remove_piece(square);
                    self.after_drop(&outcome);
                }
            }
            BoardIntent::Square(square) => self.square_clicked(interaction, square),
            BoardIntent::Tray(_) | BoardIntent::Trash => {}
        }
    }

    fn square_clicked(&mut self, interaction: Interaction, square: Square) {
        if interaction == Interaction::Locked {
            return;
        }
        if let (Interaction::Setup, Some(piece)) = (interaction, self.tray) {
            let outcome = self.runner.place_piece(square, piece);
            self.after_drop(&outcome);
            return;
        }
        let occupied = self.runner.sequence().placement().piece_at(square).is_some();
        match self.selected {
            Some(from) if from == square => self.selected = None,
            Some(from) => {
                let outcome = self.runner.drop_piece(from, square);
                self.selected = None;
                if outcome == DropOutcome::Rejected && occupied {
                    self.selected = Some(square);
                }
                self.after_drop(&outcome);
            }
            None if occupied => self.selected = Some(square),
            None => {}
        }
    }

    fn after_drop(&mut self, outcome: &DropOutcome) {
        match outcome {
            DropOutcome::Rejected => {}
            DropOutcome::Undone { .. } => self.feedback = Feedback::warning(WRONG_MOVE),
            DropOutcome::Accepted { verification, .. } => match verification {
                Verification::Completed { step } => {
                    self.feedback = Feedback::success(format!(
                        "Excellent! You've completed Step {}: {}.",
                        step + 1,
                        self.runner.current_step().title
                    ));
                }
                Verification::Partial { .. } | Verification::Inconclusive(_) => {
                    self.feedback = self.verification_feedback(verification);
                }
                Verification::AlreadyComplete | Verification::Incomplete => {}
            },
        }
    }

    fn verification_feedback(&self, verification: &Verification) -> Feedback {
        match verification {
            Verification::Completed { .. } | Verification::AlreadyComplete => {
                Feedback::success(ALREADY_COMPLETE)
            }
            Verification::Partial { remaining } => Feedback::info(format!(
                "Good start! Now complete the remaining tasks: {}",
                remaining.join(" ")
            )),
            Verification::Incomplete => Feedback::warning(NOT_QUITE),
            Verification::Inconclusive(_) => Feedback {
                kind: NotificationKind::Error,
                text: UNCHECKABLE.to_owned(),
            },
        }
    }
}
