use shakmaty::{Color, Rank, Role, Square, attacks};

use super::position::Placement;

/// Destinations for a free-moving piece: movement geometry only, no turn,
/// no check detection, no kings required on the board.
#[must_use]
pub fn sandbox_destinations(placement: &Placement, from: Square) -> Vec<Square> {
    let Some(piece) = placement.piece_at(from) else {
        return Vec::new();
    };
    let board = placement.board();
    let occupied = board.occupied();
    let own = board.by_color(piece.color);

    let reach = match piece.role {
        Role::Pawn => return pawn_destinations(placement, from, piece.color),
        Role::Knight => attacks::knight_attacks(from),
        Role::Bishop => attacks::bishop_attacks(from, occupied),
        Role::Rook => attacks::rook_attacks(from, occupied),
        Role::Queen => attacks::queen_attacks(from, occupied),
        Role::King => attacks::king_attacks(from),
    };
    (reach & !own).into_iter().collect()
}

fn pawn_destinations(placement: &Placement, from: Square, color: Color) -> Vec<Square> {
    let (step, home) = match color {
        Color::White => (8, Rank::Second),
        Color::Black => (-8, Rank::Seventh),
    };
    let mut targets = Vec::new();

    if let Some(one) = from.offset(step).filter(|sq| placement.piece_at(*sq).is_none()) {
        targets.push(one);
        if from.rank() == home {
            if let Some(two) = one.offset(step).filter(|sq| placement.piece_at(*sq).is_none()) {
                targets.push(two);
            }
        }
    }

    let enemies = placement.board().by_color(!color);
    targets.extend(attacks::pawn_attacks(color, from) & enemies);
    targets.sort();
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lone(notation: &str) -> Placement {
        Placement::parse(notation).unwrap()
    }

    #[test]
    fn pawn_on_home_rank_can_advance_one_or_two() {
        let placement = lone("8/8/8/8/8/8/P7/8");
        assert_eq!(
            sandbox_destinations(&placement, Square::A2),
            vec![Square::A3, Square::A4]
        );
    }

    #[test]
    fn pawn_captures_diagonally_only_onto_enemies() {
        let placement = lone("8/8/8/8/8/1p6/P7/8");
        assert_eq!(
            sandbox_destinations(&placement, Square::A2),
            vec![Square::A3, Square::B3, Square::A4]
        );
    }

    #[test]
    fn knight_in_corner_has_two_jumps() {
        let placement = lone("8/8/8/8/8/8/8/N7");
        let mut targets = sandbox_destinations(&placement, Square::A1);
        targets.sort();
        assert_eq!(targets, vec![Square::C2, Square::B3]);
    }

    #[test]
    fn sliders_cover_their_lines() {
        assert_eq!(sandbox_destinations(&lone("8/8/8/8/8/8/8/R7"), Square::A1).len(), 14);
        assert_eq!(sandbox_destinations(&lone("8/8/8/8/8/8/8/B7"), Square::A1).len(), 7);
        assert_eq!(sandbox_destinations(&lone("8/8/8/8/8/8/8/Q7"), Square::A1).len(), 21);
        assert_eq!(sandbox_destinations(&lone("8/8/8/8/8/8/8/K7"), Square::A1).len(), 3);
    }

    #[test]
    fn empty_square_has_no_destinations() {
        assert!(sandbox_destinations(&Placement::empty(), Square::E4).is_empty());
    }
}
