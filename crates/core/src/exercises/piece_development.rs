use crate::steps::{StepCheck, StepDefinition};

pub(super) fn steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            "Knights First",
            "Knights are typically the first pieces to develop in the opening. They can jump over other pieces and control important center squares.",
        )
        .instructions("Develop one of your knights to a good square. Knights should generally be developed towards the center of the board.")
        .tasks(&["Move one of your knights to either f3 or c3"])
        .start("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        .hint("Knights on f3 or c3 control important center squares and prepare for castling.")
        .check(StepCheck::MoveIn(&["Nf3", "Nc3"])),
        StepDefinition::new(
            "Develop Center Pawns",
            "Controlling the center with pawns gives your pieces more mobility and restricts your opponent's options.",
        )
        .instructions("Move one of your center pawns (d or e) forward to control the center.")
        .tasks(&["Move your e-pawn or d-pawn forward by one or two squares"])
        .start("rnbqkb1r/pppppppp/5n2/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 2 2")
        .hint("The e4 and d4 pawns control important center squares and open lines for your bishop and queen.")
        .check(StepCheck::MoveIn(&["e4", "d4", "e5", "d5", "e6", "d6"])),
        StepDefinition::new(
            "Develop Bishops",
            "After developing knights and center pawns, bishops should be developed to active squares where they control diagonals.",
        )
        .instructions("Develop one of your bishops to an active square.")
        .tasks(&["Move your light-squared bishop to an active square (like c4 or b5)"])
        .start("rnbqk2r/pppp1ppp/5n2/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 1")
        .hint("The bishop on c4 controls the important d5 square and puts pressure on the f7 pawn.")
        .check(StepCheck::MoveIn(&["Bc4", "Bb5"])),
        StepDefinition::new(
            "Castle Early",
            "Castling is a crucial move that improves your king's safety and connects your rooks.",
        )
        .instructions("Castle to bring your king to safety and connect your rooks.")
        .tasks(&["Castle kingside (O-O)"])
        .start("rnbqk2r/pppp1ppp/5n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
        .hint("Castling kingside moves your king to g1 and your rook to f1, improving king safety and connecting your rooks.")
        .check(StepCheck::MoveIn(&["O-O"])),
        StepDefinition::new(
            "Complete Development",
            "Complete your development by bringing out your remaining pieces before starting an attack.",
        )
        .instructions("Complete your development by castling and connecting your rooks.")
        .tasks(&[
            "Castle kingside (O-O)",
            "Notice how both sides have completed basic development",
        ])
        .start("rnbqk2r/pppp1ppp/5n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4")
        .hint("After castling, both sides have completed the basic opening principles: developed knights and bishops, controlled the center, and castled for king safety.")
        .check(StepCheck::MoveIn(&["O-O"])),
    ]
}
