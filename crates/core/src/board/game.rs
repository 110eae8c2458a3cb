use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, FromSetup, Move, Position, Role, Square};

use super::position::{Placement, PositionError};

/// Where a game stands after the last move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// The side to move is in check.
    Check,
    Checkmate { winner: Color },
    Stalemate,
    /// Insufficient material.
    Draw,
}

/// A move the rules engine accepted, with its SAN rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayedMove {
    pub from: Square,
    pub to: Square,
    pub san: String,
}

/// Rules-checked game state for `Play` boards.
///
/// With a solo colour set, the turn is handed back to that colour after
/// every move so the learner can play several moves in a row.
#[derive(Clone, Debug)]
pub struct Game {
    position: Chess,
    solo: Option<Color>,
}

impl Game {
    /// The standard starting position.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            position: Chess::default(),
            solo: None,
        }
    }

    /// Accepts a full FEN or a bare placement (white to move, no castling).
    ///
    /// # Errors
    ///
    /// Returns `PositionError::InvalidPosition` when the FEN does not parse
    /// or describes an impossible position.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let full = if fen.split_whitespace().count() == 1 {
            format!("{} w - - 0 1", fen.trim())
        } else {
            fen.trim().to_string()
        };
        let invalid = |reason: String| PositionError::InvalidPosition {
            fen: fen.to_string(),
            reason,
        };
        let parsed = full
            .parse::<Fen>()
            .map_err(|err| invalid(err.to_string()))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|err| invalid(err.to_string()))?;
        Ok(Self {
            position,
            solo: None,
        })
    }

    #[must_use]
    pub fn with_solo(mut self, color: Option<Color>) -> Self {
        self.solo = color;
        if let Some(color) = color {
            self.hand_turn_to(color);
        }
        self
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement::from_board(self.position.board().clone())
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if !self.is_game_over() {
            return if self.position.is_check() {
                GameStatus::Check
            } else {
                GameStatus::InProgress
            };
        }
        if self.position.is_checkmate() {
            GameStatus::Checkmate {
                winner: !self.position.turn(),
            }
        } else if self.position.is_stalemate() {
            GameStatus::Stalemate
        } else {
            GameStatus::Draw
        }
    }

    /// Square of the king that is in check, if any.
    #[must_use]
    pub fn checked_king(&self) -> Option<Square> {
        if self.position.is_check() {
            self.position.board().king_of(self.position.turn())
        } else {
            None
        }
    }

    /// Full six-field FEN of the current position.
    #[must_use]
    pub fn fen(&self) -> String {
        let setup = self.position.clone().into_setup(EnPassantMode::Legal);
        let turn = match setup.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let castling: String = [
            (Square::H1, 'K'),
            (Square::A1, 'Q'),
            (Square::H8, 'k'),
            (Square::A8, 'q'),
        ]
        .into_iter()
        .filter(|(rook, _)| setup.castling_rights.contains(*rook))
        .map(|(_, flag)| flag)
        .collect();
        let castling = if castling.is_empty() { "-".to_owned() } else { castling };
        let en_passant = setup
            .ep_square
            .map_or_else(|| "-".to_owned(), |square| square.to_string());
        format!(
            "{} {turn} {castling} {en_passant} {} {}",
            self.placement().notation(),
            setup.halfmoves,
            setup.fullmoves
        )
    }

    #[must_use]
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .position
            .legal_moves()
            .iter()
            .filter(|m| m.from() == Some(from))
            .map(|m| drop_square(m, self.position.turn()))
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// Plays the legal move matching a drag from `from` to `to`.
    /// Promotions default to a queen. Returns `None` when no legal move fits.
    pub fn try_move(&mut self, from: Square, to: Square) -> Option<PlayedMove> {
        let turn = self.position.turn();
        let legal = self.position.legal_moves();
        let candidate = legal
            .iter()
            .filter(|m| m.from() == Some(from))
            .filter(|m| drop_square(m, turn) == to || m.to() == to)
            .find(|m| matches!(m.promotion(), None | Some(Role::Queen)))?
            .clone();

        let san = San::from_move(&self.position, &candidate).to_string();
        self.position.play_unchecked(&candidate);
        if let Some(color) = self.solo {
            self.hand_turn_to(color);
        }
        Some(PlayedMove { from, to, san })
    }

    // A hand-back that would leave an impossible position keeps the
    // engine's turn instead.
    fn hand_turn_to(&mut self, color: Color) {
        if self.position.turn() == color {
            return;
        }
        let mut setup = self.position.clone().into_setup(EnPassantMode::Legal);
        setup.turn = color;
        setup.ep_square = None;
        if let Ok(position) = Chess::from_setup(setup, CastlingMode::Standard) {
            self.position = position;
        }
    }
}

// Castling drags land on the king's destination square.
fn drop_square(m: &Move, turn: Color) -> Square {
    match m.castling_side() {
        Some(side) => side.king_to(turn),
        None => m.to(),
    }
}
