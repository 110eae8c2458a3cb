use std::fmt;

use shakmaty::{Board, File, Piece, Rank, Square};
use thiserror::Error;

pub const STANDARD_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
pub const EMPTY_PLACEMENT: &str = "8/8/8/8/8/8/8/8";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PositionError {
    #[error("invalid piece placement `{notation}`: {reason}")]
    InvalidPlacement { notation: String, reason: String },
    #[error("invalid position `{fen}`: {reason}")]
    InvalidPosition { fen: String, reason: String },
    #[error("invalid square `{0}`")]
    InvalidSquare(String),
    #[error("invalid piece symbol `{0}`")]
    InvalidPiece(char),
}

/// Piece placement only: the first field of a FEN string.
#[derive(Clone, PartialEq, Eq)]
pub struct Placement {
    board: Board,
}

impl Placement {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            board: Board::empty(),
        }
    }

    #[must_use]
    pub fn standard() -> Self {
        Self { board: Board::new() }
    }

    /// Accepts either a bare placement or a full FEN; only the first field is read.
    ///
    /// # Errors
    ///
    /// Returns `PositionError::InvalidPlacement` when the field does not describe
    /// an 8x8 board.
    pub fn parse(notation: &str) -> Result<Self, PositionError> {
        let field = notation.split_whitespace().next().unwrap_or_default();
        let board = field
            .parse::<Board>()
            .map_err(|err| PositionError::InvalidPlacement {
                notation: notation.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self { board })
    }

    pub(crate) fn from_board(board: Board) -> Self {
        Self { board }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn notation(&self) -> String {
        let mut out = String::with_capacity(STANDARD_PLACEMENT.len());
        for (i, rank) in Rank::ALL.iter().rev().enumerate() {
            if i > 0 {
                out.push('/');
            }
            let mut empty = 0u8;
            for file in File::ALL {
                match self.board.piece_at(Square::from_coords(file, *rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
        }
        out
    }

    /// Compares against another placement string; unparsable input never matches.
    #[must_use]
    pub fn matches(&self, notation: &str) -> bool {
        Placement::parse(notation).is_ok_and(|other| other == *self)
    }

    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    pub fn place(&mut self, square: Square, piece: Piece) {
        self.board.set_piece_at(square, piece);
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.board.remove_piece_at(square)
    }

    /// Moves whatever stands on `from` to `to`, replacing any piece there.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.board.remove_piece_at(from)?;
        self.board.set_piece_at(to, piece);
        Some(piece)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .occupied()
            .into_iter()
            .filter_map(|sq| self.board.piece_at(sq).map(|piece| (sq, piece)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.board.occupied().is_empty()
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Placement({})", self.notation())
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// # Errors
///
/// Returns `PositionError::InvalidSquare` for anything but `a1`..`h8`.
pub fn parse_square(name: &str) -> Result<Square, PositionError> {
    name.parse::<Square>()
        .map_err(|_| PositionError::InvalidSquare(name.to_string()))
}

/// # Errors
///
/// Returns `PositionError::InvalidPiece` for symbols outside `PNBRQKpnbrqk`.
pub fn parse_piece(symbol: char) -> Result<Piece, PositionError> {
    Piece::from_char(symbol).ok_or(PositionError::InvalidPiece(symbol))
}
