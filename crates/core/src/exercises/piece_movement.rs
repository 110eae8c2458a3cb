use crate::steps::{StepCheck, StepDefinition};

pub(super) fn steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            "Pawn",
            "The pawn is the most numerous piece and moves forward one square at a time. On its first move, a pawn can move two squares forward. It captures diagonally forward. If a pawn reaches the opposite end of the board, it can be promoted to any other piece except a king.",
        )
        .tasks(&[
            "Move the pawn forward one square",
            "Now try moving it forward two squares (special first move)",
            "Pawns capture diagonally - see the highlighted squares",
        ])
        .start("8/8/8/8/8/8/P7/8")
        .highlights(&["a2"])
        .check(StepCheck::AnyMove),
        StepDefinition::new(
            "Knight",
            "The knight moves in an L-shape: two squares in one direction and then one square perpendicular to that direction. It's the only piece that can jump over other pieces. The knight is particularly effective in closed positions where other pieces have limited mobility.",
        )
        .tasks(&[
            "Move the knight in an L-shape (2 squares in one direction, then 1 square perpendicular)",
            "Try moving to all possible squares from the center",
        ])
        .start("8/8/8/8/8/8/8/N7")
        .highlights(&["a1"])
        .check(StepCheck::AnyMove),
        StepDefinition::new(
            "Bishop",
            "The bishop moves any number of squares diagonally. Each bishop is restricted to squares of a single color. Bishops are particularly powerful in open positions where they have greater mobility.",
        )
        .tasks(&[
            "Move the bishop diagonally any number of squares",
            "Notice how it can only access squares of one color",
        ])
        .start("8/8/8/8/8/8/8/B7")
        .highlights(&["a1"])
        .check(StepCheck::AnyMove),
        StepDefinition::new(
            "Rook",
            "The rook moves any number of squares horizontally or vertically. Rooks are particularly powerful in open files and ranks. They are usually developed later in the game after pawns and minor pieces.",
        )
        .tasks(&[
            "Move the rook horizontally or vertically any number of squares",
            "Try controlling an open file or rank",
        ])
        .start("8/8/8/8/8/8/8/R7")
        .highlights(&["a1"])
        .check(StepCheck::AnyMove),
        StepDefinition::new(
            "Queen",
            "The queen is the most powerful piece, combining the movement of a rook and bishop. It can move any number of squares horizontally, vertically, or diagonally. Despite its power, the queen should not be developed too early as it can become a target for the opponent.",
        )
        .tasks(&[
            "Move the queen horizontally, vertically, or diagonally any number of squares",
            "Notice how it combines the powers of the rook and bishop",
        ])
        .start("8/8/8/8/8/8/8/Q7")
        .highlights(&["a1"])
        .check(StepCheck::AnyMove),
        StepDefinition::new(
            "King",
            "The king moves one square in any direction. While not the most powerful piece in mobility, it's the most important as the game ends when the king is checkmated. The king can also perform a special move called castling with a rook.",
        )
        .tasks(&[
            "Move the king one square in any direction",
            "The king must always stay safe from check",
        ])
        .start("8/8/8/8/8/8/8/K7")
        .highlights(&["a1"])
        .check(StepCheck::AnyMove),
    ]
}
