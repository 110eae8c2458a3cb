use chessedu_core::board::{
    Color, File, Game, Piece, Placement, PlayedMove, Rank, Role, Square, parse_square,
};
use chessedu_core::steps::{GuidedSequence, Interaction};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquareVm {
    pub square: Square,
    pub name: String,
    pub piece: Option<Piece>,
    pub glyph: &'static str,
    pub dark: bool,
    pub highlighted: bool,
    pub controlled: bool,
    pub selected: bool,
    pub destination: bool,
    pub last_move: bool,
    pub check: bool,
}

impl SquareVm {
    /// CSS classes for the square cell.
    #[must_use]
    pub fn class(&self) -> String {
        let mut class = String::from(if self.dark { "square dark" } else { "square light" });
        for (on, name) in [
            (self.highlighted, "highlight"),
            (self.controlled, "controlled"),
            (self.selected, "selected"),
            (self.destination, "destination"),
            (self.last_move, "last-move"),
            (self.check, "check"),
        ] {
            if on {
                class.push(' ');
                class.push_str(name);
            }
        }
        class
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardVm {
    /// Rank 8 first, file a first inside each rank.
    pub squares: Vec<SquareVm>,
    pub interaction: Interaction,
    pub show_tray: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrayPieceVm {
    pub piece: Piece,
    pub glyph: &'static str,
    pub selected: bool,
}

#[must_use]
pub fn glyph(piece: Piece) -> &'static str {
    match (piece.color, piece.role) {
        (Color::White, Role::King) => "♔",
        (Color::White, Role::Queen) => "♕",
        (Color::White, Role::Rook) => "♖",
        (Color::White, Role::Bishop) => "♗",
        (Color::White, Role::Knight) => "♘",
        (Color::White, Role::Pawn) => "♙",
        (Color::Black, Role::King) => "♚",
        (Color::Black, Role::Queen) => "♛",
        (Color::Black, Role::Rook) => "♜",
        (Color::Black, Role::Bishop) => "♝",
        (Color::Black, Role::Knight) => "♞",
        (Color::Black, Role::Pawn) => "♟",
    }
}

fn named(squares: &[&str]) -> Vec<Square> {
    squares
        .iter()
        .filter_map(|name| parse_square(name).ok())
        .collect()
}

#[derive(Default)]
struct Marks {
    highlights: Vec<Square>,
    controlled: Vec<Square>,
    selected: Option<Square>,
    destinations: Vec<Square>,
    last_move: Option<[Square; 2]>,
    check: Option<Square>,
}

fn layout(placement: &Placement, marks: &Marks, flipped: bool) -> Vec<SquareVm> {
    let mut ranks: Vec<Rank> = Rank::ALL.into_iter().rev().collect();
    let mut files: Vec<File> = File::ALL.into_iter().collect();
    if flipped {
        ranks.reverse();
        files.reverse();
    }

    let mut squares = Vec::with_capacity(64);
    for &rank in &ranks {
        for &file in &files {
            let square = Square::from_coords(file, rank);
            let piece = placement.piece_at(square);
            squares.push(SquareVm {
                square,
                name: square.to_string(),
                piece,
                glyph: piece.map_or("", glyph),
                dark: square.is_dark(),
                highlighted: marks.highlights.contains(&square),
                controlled: marks.controlled.contains(&square),
                selected: marks.selected == Some(square),
                destination: marks.destinations.contains(&square),
                last_move: marks.last_move.is_some_and(|m| m.contains(&square)),
                check: marks.check == Some(square),
            });
        }
    }
    squares
}

#[must_use]
pub fn build_board(sequence: &GuidedSequence, selected: Option<Square>) -> BoardVm {
    let step = sequence.current_step();
    let marks = Marks {
        highlights: named(step.highlights),
        controlled: named(step.controlled),
        selected,
        destinations: selected
            .map(|from| sequence.legal_destinations(from))
            .unwrap_or_default(),
        last_move: sequence.last_move().map(|m| [m.from, m.to]),
        check: None,
    };

    let interaction = sequence.interaction();
    BoardVm {
        squares: layout(&sequence.placement(), &marks, false),
        interaction,
        show_tray: interaction == Interaction::Setup,
    }
}

/// Board of a free game, seen from Black when `flipped`.
#[must_use]
pub fn build_game_board(
    game: &Game,
    selected: Option<Square>,
    last_move: Option<&PlayedMove>,
    flipped: bool,
) -> BoardVm {
    let marks = Marks {
        selected,
        destinations: selected
            .map(|from| game.legal_destinations(from))
            .unwrap_or_default(),
        last_move: last_move.map(|m| [m.from, m.to]),
        check: game.checked_king(),
        ..Marks::default()
    };
    let interaction = if game.is_game_over() {
        Interaction::Locked
    } else {
        Interaction::Play
    };
    BoardVm {
        squares: layout(&game.placement(), &marks, flipped),
        interaction,
        show_tray: false,
    }
}

/// Spare pieces offered while setting up a board.
#[must_use]
pub fn spare_pieces(selected: Option<Piece>) -> Vec<TrayPieceVm> {
    let roles = [
        Role::King,
        Role::Queen,
        Role::Rook,
        Role::Bishop,
        Role::Knight,
        Role::Pawn,
    ];
    [Color::White, Color::Black]
        .into_iter()
        .flat_map(|color| roles.into_iter().map(move |role| Piece { color, role }))
        .map(|piece| TrayPieceVm {
            piece,
            glyph: glyph(piece),
            selected: selected == Some(piece),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessedu_core::exercises;
    use chessedu_core::model::ExerciseId;

    fn start(id: ExerciseId) -> GuidedSequence {
        exercises::exercise(id).unwrap().start().unwrap()
    }

    fn square<'a>(board: &'a BoardVm, name: &str) -> &'a SquareVm {
        board.squares.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn squares_run_from_a8_to_h1() {
        let board = build_board(&start(ExerciseId::PieceDevelopment), None);
        assert_eq!(board.squares.len(), 64);
        assert_eq!(board.squares[0].name, "a8");
        assert_eq!(board.squares[63].name, "h1");
        assert!(!board.squares[63].dark);
        assert!(board.squares[56].dark);
        assert_eq!(square(&board, "e1").glyph, "♔");
        assert_eq!(square(&board, "d8").glyph, "♛");
    }

    #[test]
    fn selection_marks_legal_destinations() {
        let sequence = start(ExerciseId::PieceDevelopment);
        let from = parse_square("g1").unwrap();
        let board = build_board(&sequence, Some(from));
        assert!(square(&board, "g1").selected);
        let destinations: Vec<_> = board
            .squares
            .iter()
            .filter(|s| s.destination)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(destinations, vec!["f3", "h3"]);
        assert!(square(&board, "f3").class().contains("destination"));
    }

    #[test]
    fn flipped_game_board_starts_at_h1() {
        let board = build_game_board(&Game::standard(), None, None, true);
        assert_eq!(board.squares[0].name, "h1");
        assert_eq!(board.squares[63].name, "a8");
        assert_eq!(board.interaction, Interaction::Play);
    }

    #[test]
    fn checked_king_is_marked() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
        let board = build_game_board(&game, None, None, false);
        assert!(square(&board, "e8").check);
        assert!(square(&board, "e8").class().ends_with("check"));
        assert!(!square(&board, "g1").check);
    }

    #[test]
    fn setup_boards_show_the_tray() {
        let mut sequence = start(ExerciseId::BoardSetup);
        sequence.verify_current();
        sequence.go_to_next().unwrap();
        let board = build_board(&sequence, None);
        assert!(board.show_tray);
        assert_eq!(spare_pieces(None).len(), 12);
    }
}
