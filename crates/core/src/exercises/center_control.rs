use crate::steps::{StepCheck, StepDefinition};

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const CENTER_PAWNS: &str = "rnbqkbnr/pppppppp/8/8/3PP3/8/PPP2PPP/RNBQKBNR";
const DEVELOPED: &str = "rnbqkbnr/pppppppp/8/8/3PP3/2NB1N2/PPP2PPP/R1BQK2R";

pub(super) fn steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            "Center Squares",
            "The center of the chessboard consists of the four central squares: d4, e4, d5, and e5. Controlling these squares gives your pieces more mobility and influence over the board.",
        )
        .tasks(&[
            "Observe the highlighted center squares",
            "These four squares are the most valuable territory on the board",
        ])
        .start(START)
        .highlights(&["d4", "e4", "d5", "e5"]),
        StepDefinition::new(
            "Center Pawns",
            "One of the most common ways to control the center is by advancing your central pawns (d and e pawns). This stakes a claim to the center and prepares for piece development.",
        )
        .tasks(&[
            "Move the d2 pawn to d4",
            "Move the e2 pawn to e4",
            "Notice how these pawns control key central squares",
        ])
        .start(START)
        .highlights(&["d2", "e2", "d4", "e4"])
        .hint("Push both central pawns two squares: d2 to d4, then e2 to e4.")
        .check(StepCheck::PlacementEquals(CENTER_PAWNS)),
        StepDefinition::new(
            "Develop Pieces",
            "After establishing pawns in the center, you should develop your pieces to support and strengthen your center control. Knights and bishops are particularly effective for this purpose.",
        )
        .tasks(&[
            "Develop your knights to f3 and c3",
            "Develop your light-squared bishop to d3",
            "These pieces now support your center pawns and control central squares",
        ])
        .start("rnbqkbnr/pppppppp/8/8/3PP3/8/PPP2PPP/RNBQKBNR w KQkq - 0 1")
        .highlights(&["c3", "f3", "d3", "g1", "b1", "f1"])
        .hint("Knights go from g1 to f3 and b1 to c3; the f1 bishop goes to d3.")
        .check(StepCheck::PlacementEquals(DEVELOPED)),
        StepDefinition::new(
            "Control Center",
            "Notice how your pawns and pieces work together to control the central squares. This central control gives you more options for attack and defense, while restricting your opponent's movement.",
        )
        .tasks(&[
            "Observe how your pieces and pawns influence the central squares",
            "The central control provides better mobility for your pieces",
            "This is a strong foundation for the middlegame",
        ])
        .start("rnbqkbnr/pppppppp/8/8/3PP3/2NB1N2/PPP2PPP/R1BQK2R w KQkq - 0 1")
        .controlled(&["c5", "d4", "e4", "f5", "c4", "d5", "e5", "f4"]),
    ]
}
