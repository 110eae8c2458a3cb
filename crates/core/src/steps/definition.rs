use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::board::{Placement, PlayedMove, PositionError, parse_piece, parse_square};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PredicateError {
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error("predicate failed: {0}")]
    Failed(String),
}

/// Live board state handed to a step check.
#[derive(Clone, Copy, Debug)]
pub struct BoardSnapshot<'a> {
    pub placement: &'a Placement,
    pub last_move: Option<&'a PlayedMove>,
}

/// Custom verification for steps the built-in checks cannot express.
pub trait StepPredicate: Send + Sync {
    /// # Errors
    ///
    /// Returns `PredicateError` when the board cannot be judged; the step
    /// is then reported inconclusive rather than failed.
    fn evaluate(&self, board: &BoardSnapshot<'_>) -> Result<bool, PredicateError>;

    /// Move-driven predicates undo a move that does not satisfy them.
    fn judges_moves(&self) -> bool {
        true
    }
}

#[derive(Clone)]
pub enum StepCheck {
    /// Observational step; checking always succeeds.
    Acknowledge,
    PlacementEquals(&'static str),
    /// Every `(square, FEN piece symbol)` pair must be on the board.
    PiecesOn(&'static [(&'static str, char)]),
    AnyMove,
    /// Last move's SAN must be one of these (check markers ignored).
    MoveIn(&'static [&'static str]),
    Custom(Arc<dyn StepPredicate>),
}

impl StepCheck {
    pub(crate) fn evaluate(&self, board: &BoardSnapshot<'_>) -> Result<bool, PredicateError> {
        match self {
            StepCheck::Acknowledge => Ok(true),
            StepCheck::PlacementEquals(target) => Ok(Placement::parse(target)? == *board.placement),
            StepCheck::PiecesOn(pieces) => {
                for (square, symbol) in *pieces {
                    let square = parse_square(square)?;
                    let piece = parse_piece(*symbol)?;
                    if board.placement.piece_at(square) != Some(piece) {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            StepCheck::AnyMove => Ok(board.last_move.is_some()),
            StepCheck::MoveIn(accepted) => Ok(board.last_move.is_some_and(|played| {
                accepted
                    .iter()
                    .any(|san| strip_check_markers(san) == strip_check_markers(&played.san))
            })),
            StepCheck::Custom(predicate) => predicate.evaluate(board),
        }
    }

    /// Wrong moves are taken back and the step locks once done.
    #[must_use]
    pub fn judges_moves(&self) -> bool {
        match self {
            StepCheck::MoveIn(_) => true,
            StepCheck::Custom(predicate) => predicate.judges_moves(),
            _ => false,
        }
    }

    /// Steps that compare the board against a layout can report partial progress.
    #[must_use]
    pub fn compares_layout(&self) -> bool {
        matches!(self, StepCheck::PlacementEquals(_) | StepCheck::PiecesOn(_))
    }
}

impl fmt::Debug for StepCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepCheck::Acknowledge => f.write_str("Acknowledge"),
            StepCheck::PlacementEquals(target) => f.debug_tuple("PlacementEquals").field(target).finish(),
            StepCheck::PiecesOn(pieces) => f.debug_tuple("PiecesOn").field(&pieces.len()).finish(),
            StepCheck::AnyMove => f.write_str("AnyMove"),
            StepCheck::MoveIn(accepted) => f.debug_tuple("MoveIn").field(accepted).finish(),
            StepCheck::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn strip_check_markers(san: &str) -> &str {
    san.trim_end_matches(['+', '#'])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepSetup {
    /// Placement or full FEN loaded when the step opens.
    Position(&'static str),
    /// Keep whatever the learner built; `reset_to` is used by the reset button.
    KeepCurrent { reset_to: &'static str },
}

impl StepSetup {
    #[must_use]
    pub fn reset_position(&self) -> &'static str {
        match *self {
            StepSetup::Position(fen) | StepSetup::KeepCurrent { reset_to: fen } => fen,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StepDefinition {
    pub title: &'static str,
    pub description: &'static str,
    pub instructions: Option<&'static str>,
    pub tasks: &'static [&'static str],
    pub setup: StepSetup,
    pub highlights: &'static [&'static str],
    pub controlled: &'static [&'static str],
    pub hint: Option<&'static str>,
    pub check: StepCheck,
}

impl StepDefinition {
    #[must_use]
    pub fn new(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            instructions: None,
            tasks: &[],
            setup: StepSetup::Position(crate::board::EMPTY_PLACEMENT),
            highlights: &[],
            controlled: &[],
            hint: None,
            check: StepCheck::Acknowledge,
        }
    }

    #[must_use]
    pub fn instructions(mut self, text: &'static str) -> Self {
        self.instructions = Some(text);
        self
    }

    #[must_use]
    pub fn tasks(mut self, tasks: &'static [&'static str]) -> Self {
        self.tasks = tasks;
        self
    }

    #[must_use]
    pub fn start(mut self, fen: &'static str) -> Self {
        self.setup = StepSetup::Position(fen);
        self
    }

    #[must_use]
    pub fn keep_current(mut self, reset_to: &'static str) -> Self {
        self.setup = StepSetup::KeepCurrent { reset_to };
        self
    }

    #[must_use]
    pub fn highlights(mut self, squares: &'static [&'static str]) -> Self {
        self.highlights = squares;
        self
    }

    #[must_use]
    pub fn controlled(mut self, squares: &'static [&'static str]) -> Self {
        self.controlled = squares;
        self
    }

    #[must_use]
    pub fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    #[must_use]
    pub fn check(mut self, check: StepCheck) -> Self {
        self.check = check;
        self
    }

    /// Placement the step must reach, when it has a single target layout.
    #[must_use]
    pub fn target(&self) -> Option<&'static str> {
        match self.check {
            StepCheck::PlacementEquals(target) => Some(target),
            _ => None,
        }
    }

    #[must_use]
    pub fn first_task(&self) -> &'static str {
        self.tasks.first().copied().unwrap_or_default()
    }

    /// Tasks after the first one, shown when the learner is part-way there.
    #[must_use]
    pub fn remaining_tasks(&self) -> Vec<&'static str> {
        self.tasks.iter().skip(1).copied().collect()
    }

    /// Observational steps refuse every drag.
    #[must_use]
    pub fn is_observational(&self) -> bool {
        matches!(self.check, StepCheck::Acknowledge)
    }
}
