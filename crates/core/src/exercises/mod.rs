//! Step catalogs of the interactive exercises.

mod board_setup;
mod center_control;
mod piece_development;
mod piece_movement;
mod pin_practice;

pub use pin_practice::CreatesPin;

use crate::board::Color;
use crate::model::{ExerciseId, LessonId};
use crate::steps::{BoardMode, GuidedSequence, StepDefinition, StepError};

/// Side effects fired once when the last step is passed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompletionPlan {
    pub award: Option<&'static str>,
    pub complete_lesson: Option<LessonId>,
    pub report_exercise: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExerciseInfo {
    pub id: ExerciseId,
    pub title: &'static str,
    pub summary: &'static str,
    pub mode: BoardMode,
    pub on_complete: CompletionPlan,
    /// Offered by the continue button of the completion panel.
    pub next: Option<ExerciseId>,
}

#[derive(Clone, Debug)]
pub struct Exercise {
    pub info: ExerciseInfo,
    pub steps: Vec<StepDefinition>,
}

impl Exercise {
    /// # Errors
    ///
    /// Returns `StepError` when the first step cannot be loaded.
    pub fn start(self) -> Result<GuidedSequence, StepError> {
        GuidedSequence::new(self.steps, self.info.mode)
    }
}

/// `None` for exercises the server lists but this client has no board for.
#[must_use]
pub fn exercise(id: ExerciseId) -> Option<Exercise> {
    let (info, steps) = match id {
        ExerciseId::PieceMovement => (
            ExerciseInfo {
                id,
                title: "Piece Movement",
                summary: "Learn how each chess piece moves on an open board.",
                mode: BoardMode::Sandbox,
                on_complete: CompletionPlan {
                    award: Some("piece_movement_mastery"),
                    ..CompletionPlan::default()
                },
                next: Some(ExerciseId::BoardSetup),
            },
            piece_movement::steps(),
        ),
        ExerciseId::BoardSetup => (
            ExerciseInfo {
                id,
                title: "Board Setup",
                summary: "Set up the chessboard from scratch.",
                mode: BoardMode::Setup,
                on_complete: CompletionPlan {
                    award: Some("board_setup"),
                    ..CompletionPlan::default()
                },
                next: None,
            },
            board_setup::steps(),
        ),
        ExerciseId::CenterControl => (
            ExerciseInfo {
                id,
                title: "Center Control",
                summary: "Claim the center with pawns and support it with pieces.",
                mode: BoardMode::Play {
                    solo: Some(Color::White),
                },
                on_complete: CompletionPlan {
                    award: Some("center_control"),
                    complete_lesson: Some(LessonId::new(2)),
                    report_exercise: false,
                },
                next: Some(ExerciseId::PieceDevelopment),
            },
            center_control::steps(),
        ),
        ExerciseId::PieceDevelopment => (
            ExerciseInfo {
                id,
                title: "Piece Development",
                summary: "Practice the opening principles move by move.",
                mode: BoardMode::Play { solo: None },
                on_complete: CompletionPlan {
                    report_exercise: true,
                    ..CompletionPlan::default()
                },
                next: None,
            },
            piece_development::steps(),
        ),
        ExerciseId::PinPractice => (
            ExerciseInfo {
                id,
                title: "Pin Practice",
                summary: "Recognise absolute and relative pins, then create your own.",
                mode: BoardMode::Play { solo: None },
                on_complete: CompletionPlan {
                    award: Some("first_pin"),
                    report_exercise: true,
                    ..CompletionPlan::default()
                },
                next: None,
            },
            pin_practice::steps(),
        ),
        ExerciseId::ForkPractice => return None,
    };
    Some(Exercise { info, steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievement;
    use crate::board::{Piece, STANDARD_PLACEMENT, Square, parse_piece, parse_square};
    use crate::steps::{Advance, DropOutcome, Verification};

    fn start(id: ExerciseId) -> GuidedSequence {
        exercise(id).unwrap().start().unwrap()
    }

    fn place(seq: &mut GuidedSequence, square: &str, symbol: char) -> DropOutcome {
        let piece: Piece = parse_piece(symbol).unwrap();
        seq.place_piece(parse_square(square).unwrap(), piece)
    }

    #[test]
    fn every_catalog_loads_each_step() {
        for id in ExerciseId::ALL {
            let Some(exercise) = exercise(id) else {
                assert_eq!(id, ExerciseId::ForkPractice);
                continue;
            };
            let total = exercise.steps.len();
            let mut seq = exercise.start().unwrap();
            for index in 0..total {
                seq.go_to_step(index).unwrap();
            }
        }
    }

    #[test]
    fn awarded_ids_exist_in_the_achievement_catalog() {
        for id in ExerciseId::ALL {
            if let Some(award) = exercise(id).and_then(|e| e.info.on_complete.award) {
                assert!(achievement::find(award).is_some(), "{award}");
            }
        }
    }

    #[test]
    fn board_setup_end_to_end() {
        let mut seq = start(ExerciseId::BoardSetup);
        assert_eq!(seq.placement().notation(), "8/8/8/8/8/8/8/8");
        assert_eq!(seq.verify_current(), Verification::Completed { step: 0 });
        assert_eq!(seq.go_to_next().unwrap(), Advance::Moved(1));

        for file in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'] {
            place(&mut seq, &format!("{file}2"), 'P');
            place(&mut seq, &format!("{file}7"), 'p');
        }
        assert!(seq.next_enabled());
        assert_eq!(seq.go_to_next().unwrap(), Advance::Moved(2));

        let back_rank = ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R'];
        for (file, symbol) in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'].into_iter().zip(back_rank) {
            place(&mut seq, &format!("{file}1"), symbol);
            place(&mut seq, &format!("{file}8"), symbol.to_ascii_lowercase());
        }
        assert!(seq.next_enabled());
        assert_eq!(seq.go_to_next().unwrap(), Advance::Moved(3));

        assert_eq!(seq.placement().notation(), STANDARD_PLACEMENT);
        assert_eq!(seq.verify_current(), Verification::Completed { step: 3 });
        assert_eq!(seq.go_to_next().unwrap(), Advance::Finished);
        assert_eq!(seq.progress().percent(), 100);
    }

    #[test]
    fn board_setup_final_check_fails_on_swapped_king_and_queen() {
        let mut seq = start(ExerciseId::BoardSetup);
        seq.go_to_step(3).unwrap();
        let back_rank = ['R', 'N', 'B', 'K', 'Q', 'B', 'N', 'R'];
        for (file, symbol) in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'].into_iter().zip(back_rank) {
            place(&mut seq, &format!("{file}1"), symbol);
            place(&mut seq, &format!("{file}8"), symbol.to_ascii_lowercase());
        }
        assert!(matches!(seq.verify_current(), Verification::Partial { .. }));
        assert!(!seq.next_enabled());
    }

    #[test]
    fn knight_development_completes_first_step() {
        for (from, to) in [(Square::G1, Square::F3), (Square::B1, Square::C3)] {
            let mut seq = start(ExerciseId::PieceDevelopment);
            let outcome = seq.drop_piece(from, to);
            assert!(matches!(
                outcome,
                DropOutcome::Accepted {
                    verification: Verification::Completed { step: 0 },
                    ..
                }
            ));
            assert!(seq.next_enabled());
        }
    }

    #[test]
    fn other_development_moves_are_taken_back() {
        let mut seq = start(ExerciseId::PieceDevelopment);
        let outcome = seq.drop_piece(Square::E2, Square::E4);
        assert!(matches!(outcome, DropOutcome::Undone { ref attempted } if attempted.san == "e4"));
        assert!(!seq.next_enabled());
        assert_eq!(seq.placement().notation(), STANDARD_PLACEMENT);
        assert!(seq.last_move().is_none());
    }

    #[test]
    fn castling_steps_accept_king_drag() {
        let mut seq = start(ExerciseId::PieceDevelopment);
        seq.go_to_step(3).unwrap();
        assert!(matches!(
            seq.drop_piece(Square::E1, Square::G1),
            DropOutcome::Accepted {
                verification: Verification::Completed { step: 3 },
                ..
            }
        ));
        seq.go_to_step(4).unwrap();
        assert!(matches!(
            seq.drop_piece(Square::E8, Square::G8),
            DropOutcome::Accepted {
                verification: Verification::Completed { step: 4 },
                ..
            }
        ));
    }

    #[test]
    fn center_control_plays_white_moves_in_a_row() {
        let mut seq = start(ExerciseId::CenterControl);
        assert_eq!(seq.verify_current(), Verification::Completed { step: 0 });
        seq.go_to_next().unwrap();
        seq.drop_piece(Square::D2, Square::D4);
        seq.drop_piece(Square::E2, Square::E4);
        assert!(seq.next_enabled());
        seq.go_to_next().unwrap();

        seq.drop_piece(Square::G1, Square::F3);
        seq.drop_piece(Square::B1, Square::C3);
        let last = seq.drop_piece(Square::F1, Square::D3);
        assert!(matches!(
            last,
            DropOutcome::Accepted {
                verification: Verification::Completed { step: 2 },
                ..
            }
        ));
    }

    #[test]
    fn pin_steps_accept_only_pinning_moves() {
        let mut seq = start(ExerciseId::PinPractice);
        seq.go_to_step(2).unwrap();
        assert!(matches!(
            seq.drop_piece(Square::G1, Square::F3),
            DropOutcome::Undone { .. }
        ));
        assert!(matches!(
            seq.drop_piece(Square::F1, Square::B5),
            DropOutcome::Accepted {
                verification: Verification::Completed { step: 2 },
                ..
            }
        ));

        seq.go_to_step(3).unwrap();
        assert!(matches!(
            seq.drop_piece(Square::G1, Square::F3),
            DropOutcome::Undone { .. }
        ));
        assert!(matches!(
            seq.drop_piece(Square::C1, Square::G5),
            DropOutcome::Accepted {
                verification: Verification::Completed { step: 3 },
                ..
            }
        ));
    }

    #[test]
    fn fork_practice_has_no_board() {
        assert!(exercise(ExerciseId::ForkPractice).is_none());
    }
}
