use chessedu_core::board::{Color, Game, GameStatus, PlayedMove, Square};

use crate::vm::board_vm::{BoardVm, build_game_board};
use crate::vm::effects_vm::NotificationKind;

pub const START_TIP: &str = "Opening tip: Try controlling the center with e4 or d4.";
pub const WHITE_TIP: &str =
    "Look for any pieces under attack and consider developing your pieces.";
pub const BLACK_TIP: &str = "Respond to White's move and watch for attacking opportunities.";
pub const GAME_OVER_TIP: &str = "The game is over. Reset the board to play again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreePlayIntent {
    Square(Square),
    Reset,
    Flip,
    Hint,
}

/// A toast raised by a board action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Announcement {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub text: String,
}

impl Announcement {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: "Board",
            text: text.into(),
        }
    }
}

/// One numbered row of the move list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePairVm {
    pub number: usize,
    pub white: String,
    pub black: Option<String>,
}

fn side(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Unguided board: both sides are played by the learner under the full rules.
pub struct FreePlayVm {
    game: Game,
    history: Vec<PlayedMove>,
    selected: Option<Square>,
    flipped: bool,
    hint: Option<&'static str>,
}

impl Default for FreePlayVm {
    fn default() -> Self {
        Self::new()
    }
}

impl FreePlayVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            game: Game::standard(),
            history: Vec::new(),
            selected: None,
            flipped: false,
            hint: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> BoardVm {
        build_game_board(&self.game, self.selected, self.history.last(), self.flipped)
    }

    #[must_use]
    pub fn fen(&self) -> String {
        self.game.fen()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        self.hint
    }

    #[must_use]
    pub fn status_text(&self) -> String {
        let turn = side(self.game.turn());
        match self.game.status() {
            GameStatus::InProgress => format!("{turn} to move"),
            GameStatus::Check => format!("{turn} to move (in check)"),
            GameStatus::Checkmate { winner } => format!("Checkmate. {} wins.", side(winner)),
            GameStatus::Stalemate => "Stalemate. The game is a draw.".to_owned(),
            GameStatus::Draw => "Draw by insufficient material.".to_owned(),
        }
    }

    #[must_use]
    pub fn history(&self) -> Vec<MovePairVm> {
        self.history
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| MovePairVm {
                number: i + 1,
                white: pair[0].san.clone(),
                black: pair.get(1).map(|m| m.san.clone()),
            })
            .collect()
    }

    pub fn apply(&mut self, intent: FreePlayIntent) -> Option<Announcement> {
        match intent {
            FreePlayIntent::Square(square) => self.click(square),
            FreePlayIntent::Reset => {
                *self = Self {
                    flipped: self.flipped,
                    ..Self::new()
                };
                Some(Announcement::info("Board reset to starting position"))
            }
            FreePlayIntent::Flip => {
                self.flipped = !self.flipped;
                let view = if self.flipped { "Black" } else { "White" };
                Some(Announcement::info(format!("Board flipped: {view}'s perspective")))
            }
            FreePlayIntent::Hint => {
                self.hint = Some(if self.game.is_game_over() {
                    GAME_OVER_TIP
                } else if self.history.is_empty() {
                    START_TIP
                } else if self.game.turn() == Color::White {
                    WHITE_TIP
                } else {
                    BLACK_TIP
                });
                None
            }
        }
    }

    fn click(&mut self, square: Square) -> Option<Announcement> {
        if self.game.is_game_over() {
            return None;
        }
        let own_piece = self
            .game
            .placement()
            .piece_at(square)
            .is_some_and(|piece| piece.color == self.game.turn());

        let Some(from) = self.selected.take() else {
            self.selected = own_piece.then_some(square);
            return None;
        };
        if from == square {
            return None;
        }
        match self.game.try_move(from, square) {
            Some(played) => {
                self.history.push(played);
                self.hint = None;
                self.after_move()
            }
            None => {
                self.selected = own_piece.then_some(square);
                None
            }
        }
    }

    fn after_move(&self) -> Option<Announcement> {
        match self.game.status() {
            GameStatus::InProgress => None,
            GameStatus::Check => Some(Announcement::info(format!(
                "{} is in check!",
                side(self.game.turn())
            ))),
            GameStatus::Checkmate { winner } => Some(Announcement {
                kind: NotificationKind::Success,
                title: "Checkmate",
                text: format!("{} wins by checkmate!", side(winner)),
            }),
            GameStatus::Stalemate | GameStatus::Draw => Some(Announcement {
                kind: NotificationKind::Warning,
                title: "Draw",
                text: self.status_text(),
            }),
        }
    }
}
