//! Board state on top of `shakmaty`: placement notation, rules-checked play
//! and free sandbox movement.

mod game;
mod position;
mod sandbox;

pub use game::{Game, GameStatus, PlayedMove};
pub use position::{
    EMPTY_PLACEMENT, Placement, PositionError, STANDARD_PLACEMENT, parse_piece, parse_square,
};
pub use sandbox::sandbox_destinations;
pub use shakmaty::{Color, File, Piece, Rank, Role, Square};
