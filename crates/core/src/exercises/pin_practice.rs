use std::sync::Arc;

use shakmaty::{Bitboard, Role, attacks};

use crate::steps::{BoardSnapshot, PredicateError, StepCheck, StepDefinition, StepPredicate};

/// Passes when the piece that just moved pins an enemy piece to its king or
/// queen along one of its lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct CreatesPin;

impl StepPredicate for CreatesPin {
    fn evaluate(&self, board: &BoardSnapshot<'_>) -> Result<bool, PredicateError> {
        let Some(played) = board.last_move else {
            return Ok(false);
        };
        let placement = board.placement;
        let attacker = placement.piece_at(played.to).ok_or_else(|| {
            PredicateError::Failed(format!("no piece on {} after {}", played.to, played.san))
        })?;
        let lines = match attacker.role {
            Role::Bishop => attacks::bishop_attacks(played.to, Bitboard::EMPTY),
            Role::Rook => attacks::rook_attacks(played.to, Bitboard::EMPTY),
            Role::Queen => attacks::queen_attacks(played.to, Bitboard::EMPTY),
            _ => return Ok(false),
        };

        let b = placement.board();
        let enemy = b.by_color(!attacker.color);
        let valuable = enemy & (b.by_role(Role::King) | b.by_role(Role::Queen)) & lines;

        for target in valuable {
            let screen = attacks::between(played.to, target) & b.occupied();
            if screen.count() != 1 {
                continue;
            }
            let Some(pinned_square) = screen.first() else {
                continue;
            };
            let Some(pinned) = b.piece_at(pinned_square) else {
                continue;
            };
            let target_is_king = b.by_role(Role::King).contains(target);
            if pinned.color != attacker.color
                && pinned.role != Role::King
                && (target_is_king || pinned.role != Role::Queen)
            {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

pub(super) fn steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            "Absolute Pins",
            "An absolute pin is when a piece cannot move at all because it would expose the king to check. This is a powerful tactical motif in chess.",
        )
        .tasks(&[
            "Observe how the bishop pins the knight to the king",
            "Understand why the pinned piece cannot move",
        ])
        .start("rnbqk2r/pppp1ppp/4pn2/8/1bPP4/2N5/PP2PPPP/R1BQKBNR w KQkq - 2 4")
        .highlights(&["b4", "c3", "d2", "e1"]),
        StepDefinition::new(
            "Relative Pins",
            "A relative pin occurs when a piece can technically move, but doing so would result in the loss of a more valuable piece behind it.",
        )
        .tasks(&[
            "Observe how the bishop pins the knight to the queen",
            "Understand the risk of moving a relatively pinned piece",
        ])
        .start("rnbqkb1r/ppp2ppp/4pn2/3p2B1/2PP4/2N5/PP2PPPP/R2QKBNR b KQkq - 3 4")
        .highlights(&["g5", "f6", "e7", "d8"]),
        StepDefinition::new(
            "Creating Pins",
            "Long-range pieces like bishops, rooks, and queens are effective at creating pins. Learning to create pins can give you a tactical advantage.",
        )
        .tasks(&[
            "Move your bishop to create a pin",
            "Notice how the pinned piece is restricted",
        ])
        .start("r1bqkbnr/ppp1pppp/2np4/8/3PP3/8/PPP2PPP/RNBQKBNR w KQkq - 1 3")
        .hint("The f1 bishop can reach b5, lining up the c6 knight with the black king.")
        .check(StepCheck::Custom(Arc::new(CreatesPin))),
        StepDefinition::new(
            "Practice Positions",
            "Test your understanding of pin tactics by analyzing different positions and identifying or creating pin opportunities.",
        )
        .tasks(&[
            "Identify the pin opportunity in this position",
            "Execute the move that creates a pin",
        ])
        .start("rnbqkb1r/ppp2ppp/4pn2/3p4/2PP4/2N5/PP2PPPP/R1BQKBNR w KQkq - 2 4")
        .hint("Bg5 pins the f6 knight against the black queen on d8.")
        .check(StepCheck::Custom(Arc::new(CreatesPin))),
    ]
}
