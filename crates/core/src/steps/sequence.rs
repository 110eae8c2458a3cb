use std::collections::BTreeSet;

use shakmaty::Color;
use thiserror::Error;

use super::definition::{BoardSnapshot, PredicateError, StepDefinition, StepSetup};
use crate::board::{Game, Piece, Placement, PlayedMove, PositionError, Square, sandbox_destinations};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepError {
    #[error("an exercise needs at least one step")]
    Empty,
    #[error("step {index} is out of range (exercise has {total} steps)")]
    OutOfRange { index: usize, total: usize },
    #[error("exercise already finished")]
    Finished,
    #[error(transparent)]
    Position(#[from] PositionError),
}

/// How the board of an exercise reacts to drags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardMode {
    /// Moves checked by the rules engine. With `solo` set, that side keeps
    /// the move after every turn.
    Play { solo: Option<Color> },
    /// Free movement of lone pieces by movement geometry.
    Sandbox,
    /// Free placement from a spare-piece tray.
    Setup,
}

/// What the board accepts right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    Play,
    Sandbox,
    Setup,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Completed { step: usize },
    AlreadyComplete,
    /// The board moved toward the target but is not there yet.
    Partial { remaining: Vec<&'static str> },
    Incomplete,
    Inconclusive(PredicateError),
}

impl Verification {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Verification::Completed { .. } | Verification::AlreadyComplete)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece snaps back to where it came from.
    Rejected,
    Accepted {
        played: Option<PlayedMove>,
        verification: Verification,
    },
    /// Legal move that does not solve the step; it was taken back.
    Undone { attempted: PlayedMove },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(usize),
    /// Current step is not complete yet.
    Blocked,
    /// Past the last step. Returned once per sequence.
    Finished,
    AlreadyFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepProgress {
    pub completed: usize,
    pub total: usize,
}

impl StepProgress {
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        u32::try_from(self.completed * 100 / self.total).unwrap_or(100)
    }
}

#[derive(Clone, Debug)]
enum BoardState {
    Play(Game),
    Free(Placement),
}

impl BoardState {
    fn placement(&self) -> Placement {
        match self {
            BoardState::Play(game) => game.placement(),
            BoardState::Free(placement) => placement.clone(),
        }
    }
}

/// Step controller for one guided exercise: current step, completed set
/// and the live board.
#[derive(Clone, Debug)]
pub struct GuidedSequence {
    steps: Vec<StepDefinition>,
    mode: BoardMode,
    current: usize,
    completed: BTreeSet<usize>,
    board: BoardState,
    start: Placement,
    last_move: Option<PlayedMove>,
    finished: bool,
}

impl GuidedSequence {
    /// Opens the first step.
    ///
    /// # Errors
    ///
    /// `StepError::Empty` without steps, `StepError::Position` when the first
    /// step's position does not parse.
    pub fn new(steps: Vec<StepDefinition>, mode: BoardMode) -> Result<Self, StepError> {
        let first = steps.first().ok_or(StepError::Empty)?;
        let board = load_board(mode, first.setup.reset_position())?;
        let mut sequence = Self {
            start: board.placement(),
            steps,
            mode,
            current: 0,
            completed: BTreeSet::new(),
            board,
            last_move: None,
            finished: false,
        };
        sequence.go_to_step(0)?;
        Ok(sequence)
    }

    #[must_use]
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_step(&self) -> &StepDefinition {
        &self.steps[self.current]
    }

    #[must_use]
    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    #[must_use]
    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn progress(&self) -> StepProgress {
        StepProgress {
            completed: self.completed.len(),
            total: self.steps.len(),
        }
    }

    #[must_use]
    pub fn next_enabled(&self) -> bool {
        !self.finished && self.is_completed(self.current)
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.board.placement()
    }

    #[must_use]
    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.last_move.as_ref()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        self.current_step().hint
    }

    #[must_use]
    pub fn interaction(&self) -> Interaction {
        let step = self.current_step();
        if self.finished
            || step.is_observational()
            || (step.check.judges_moves() && self.is_completed(self.current))
        {
            return Interaction::Locked;
        }
        match self.mode {
            BoardMode::Play { .. } => Interaction::Play,
            BoardMode::Sandbox => Interaction::Sandbox,
            BoardMode::Setup => Interaction::Setup,
        }
    }

    /// Loads step `index`, resetting the board to its setup and clearing the
    /// last move. Completion state of the step is kept.
    ///
    /// # Errors
    ///
    /// `StepError::OutOfRange` for an unknown index, `StepError::Finished`
    /// once the exercise is over.
    pub fn go_to_step(&mut self, index: usize) -> Result<&StepDefinition, StepError> {
        if self.finished {
            return Err(StepError::Finished);
        }
        let step = self.steps.get(index).ok_or(StepError::OutOfRange {
            index,
            total: self.steps.len(),
        })?;
        if let StepSetup::Position(fen) = step.setup {
            self.board = load_board(self.mode, fen)?;
        }
        self.start = self.board.placement();
        self.current = index;
        self.last_move = None;
        Ok(&self.steps[index])
    }

    /// # Errors
    ///
    /// Propagates `go_to_step` errors for the next step.
    pub fn go_to_next(&mut self) -> Result<Advance, StepError> {
        if self.finished {
            return Ok(Advance::AlreadyFinished);
        }
        if !self.is_completed(self.current) {
            return Ok(Advance::Blocked);
        }
        let next = self.current + 1;
        if next < self.steps.len() {
            self.go_to_step(next)?;
            Ok(Advance::Moved(next))
        } else {
            self.finished = true;
            Ok(Advance::Finished)
        }
    }

    /// Returns the index opened, or `None` on the first step.
    ///
    /// # Errors
    ///
    /// Propagates `go_to_step` errors.
    pub fn go_to_previous(&mut self) -> Result<Option<usize>, StepError> {
        let Some(previous) = self.current.checked_sub(1) else {
            return Ok(None);
        };
        self.go_to_step(previous)?;
        Ok(Some(previous))
    }

    /// Puts the current step's position back on the board.
    ///
    /// # Errors
    ///
    /// `StepError::Finished` after completion, `StepError::Position` for a
    /// malformed reset position.
    pub fn reset_board(&mut self) -> Result<(), StepError> {
        if self.finished {
            return Err(StepError::Finished);
        }
        let fen = self.current_step().setup.reset_position();
        self.board = load_board(self.mode, fen)?;
        self.start = self.board.placement();
        self.last_move = None;
        Ok(())
    }

    #[must_use]
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        match (self.interaction(), &self.board) {
            (Interaction::Play, BoardState::Play(game)) => game.legal_destinations(from),
            (Interaction::Sandbox, BoardState::Free(placement)) => {
                sandbox_destinations(placement, from)
            }
            _ => Vec::new(),
        }
    }

    /// Re-evaluates the current step against the live board.
    pub fn verify_current(&mut self) -> Verification {
        if self.is_completed(self.current) {
            return Verification::AlreadyComplete;
        }
        let placement = self.board.placement();
        let step = &self.steps[self.current];
        let snapshot = BoardSnapshot {
            placement: &placement,
            last_move: self.last_move.as_ref(),
        };
        match step.check.evaluate(&snapshot) {
            Ok(true) => {
                self.completed.insert(self.current);
                Verification::Completed { step: self.current }
            }
            Ok(false) if step.check.compares_layout() && placement != self.start => {
                Verification::Partial {
                    remaining: step.remaining_tasks(),
                }
            }
            Ok(false) => Verification::Incomplete,
            Err(err) => Verification::Inconclusive(err),
        }
    }

    /// Handles a drag from `from` to `to`.
    pub fn drop_piece(&mut self, from: Square, to: Square) -> DropOutcome {
        if from == to {
            return DropOutcome::Rejected;
        }
        match (self.interaction(), &mut self.board) {
            (Interaction::Play, BoardState::Play(game)) => {
                let before = game.clone();
                let Some(played) = game.try_move(from, to) else {
                    return DropOutcome::Rejected;
                };
                self.last_move = Some(played.clone());
                let verification = self.verify_current();
                let judges_moves = self.current_step().check.judges_moves();
                if judges_moves && matches!(verification, Verification::Incomplete) {
                    self.board = BoardState::Play(before);
                    self.last_move = None;
                    return DropOutcome::Undone { attempted: played };
                }
                DropOutcome::Accepted {
                    played: Some(played),
                    verification,
                }
            }
            (Interaction::Sandbox, BoardState::Free(placement)) => {
                if !sandbox_destinations(placement, from).contains(&to) {
                    return DropOutcome::Rejected;
                }
                let Some(piece) = placement.relocate(from, to) else {
                    return DropOutcome::Rejected;
                };
                let played = PlayedMove {
                    from,
                    to,
                    san: sandbox_label(piece, to),
                };
                self.last_move = Some(played.clone());
                DropOutcome::Accepted {
                    played: Some(played),
                    verification: self.verify_current(),
                }
            }
            (Interaction::Setup, BoardState::Free(placement)) => {
                if placement.relocate(from, to).is_none() {
                    return DropOutcome::Rejected;
                }
                DropOutcome::Accepted {
                    played: None,
                    verification: self.verify_current(),
                }
            }
            _ => DropOutcome::Rejected,
        }
    }

    /// Drops a spare piece from the tray. Setup boards only.
    pub fn place_piece(&mut self, square: Square, piece: Piece) -> DropOutcome {
        match (self.interaction(), &mut self.board) {
            (Interaction::Setup, BoardState::Free(placement)) => {
                placement.place(square, piece);
                DropOutcome::Accepted {
                    played: None,
                    verification: self.verify_current(),
                }
            }
            _ => DropOutcome::Rejected,
        }
    }

    /// Drags a piece off the board. Setup boards only.
    pub fn remove_piece(&mut self, square: Square) -> DropOutcome {
        match (self.interaction(), &mut self.board) {
            (Interaction::Setup, BoardState::Free(placement)) => {
                if placement.remove(square).is_none() {
                    return DropOutcome::Rejected;
                }
                DropOutcome::Accepted {
                    played: None,
                    verification: self.verify_current(),
                }
            }
            _ => DropOutcome::Rejected,
        }
    }
}

fn load_board(mode: BoardMode, fen: &str) -> Result<BoardState, PositionError> {
    match mode {
        BoardMode::Play { solo } => Ok(BoardState::Play(Game::from_fen(fen)?.with_solo(solo))),
        BoardMode::Sandbox | BoardMode::Setup => Ok(BoardState::Free(Placement::parse(fen)?)),
    }
}

fn sandbox_label(piece: Piece, to: Square) -> String {
    match piece.role.upper_char() {
        'P' => to.to_string(),
        symbol => format!("{symbol}{to}"),
    }
}
