use crate::board::{EMPTY_PLACEMENT, STANDARD_PLACEMENT};
use crate::steps::{StepCheck, StepDefinition};

pub(super) const PAWNS_PLACED: &str = "8/pppppppp/8/8/8/8/PPPPPPPP/8";

const PAWN_SQUARES: &[(&str, char)] = &[
    ("a2", 'P'),
    ("b2", 'P'),
    ("c2", 'P'),
    ("d2", 'P'),
    ("e2", 'P'),
    ("f2", 'P'),
    ("g2", 'P'),
    ("h2", 'P'),
    ("a7", 'p'),
    ("b7", 'p'),
    ("c7", 'p'),
    ("d7", 'p'),
    ("e7", 'p'),
    ("f7", 'p'),
    ("g7", 'p'),
    ("h7", 'p'),
];

const PIECE_SQUARES: &[(&str, char)] = &[
    ("a1", 'R'),
    ("b1", 'N'),
    ("c1", 'B'),
    ("d1", 'Q'),
    ("e1", 'K'),
    ("f1", 'B'),
    ("g1", 'N'),
    ("h1", 'R'),
    ("a8", 'r'),
    ("b8", 'n'),
    ("c8", 'b'),
    ("d8", 'q'),
    ("e8", 'k'),
    ("f8", 'b'),
    ("g8", 'n'),
    ("h8", 'r'),
];

pub(super) fn steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            "Board Orientation",
            "The chessboard should be set up with a white square in the bottom right corner. The coordinates run from a-h horizontally and 1-8 vertically.",
        )
        .tasks(&[
            "Make sure the board is oriented correctly with a white square in the bottom right",
            "Notice how the coordinates run along the edges of the board",
        ])
        .start(EMPTY_PLACEMENT)
        .highlights(&["h1", "a8"]),
        StepDefinition::new(
            "Place Pawns",
            "Pawns form the front line of your army. White pawns start on the second rank (row 2), and black pawns start on the seventh rank (row 7).",
        )
        .tasks(&[
            "Place white pawns on the second rank (a2-h2)",
            "Place black pawns on the seventh rank (a7-h7)",
        ])
        .keep_current(EMPTY_PLACEMENT)
        .hint("Drag pawns from the tray below the board onto every square of ranks 2 and 7.")
        .check(StepCheck::PiecesOn(PAWN_SQUARES)),
        StepDefinition::new(
            "Place Pieces",
            "The major and minor pieces are arranged on the first and eighth ranks. The setup is symmetric for both sides. From left to right: Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook.",
        )
        .tasks(&[
            "Place white pieces on the first rank (a1-h1)",
            "Place black pieces on the eighth rank (a8-h8)",
            "Remember: Rooks in the corners, then Knights, then Bishops",
            "Queen goes on her own color (white queen on d1, black queen on d8)",
            "King goes on the remaining center square",
        ])
        .start(PAWNS_PLACED)
        .hint("The queen stands on her own colour: the white queen on the light d1 square.")
        .check(StepCheck::PiecesOn(PIECE_SQUARES)),
        StepDefinition::new(
            "Final Check",
            "Review the complete setup. Remember these key points: white square in bottom right, queens on their own color (white queen on white square, black queen on black square), and the position is symmetric.",
        )
        .tasks(&[
            "Verify that all pieces are in their correct starting positions",
            "White moves first in chess",
        ])
        .keep_current(PAWNS_PLACED)
        .check(StepCheck::PlacementEquals(STANDARD_PLACEMENT)),
    ]
}
