//! Static evaluation.
//!
//! Scores are fixed point with 100 = one pawn, from White's point of view.

use crate::Position;
use chess_core::{Color, File, PieceKind, Rank, Square};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 300;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
/// Large enough that losing the king outweighs any material.
pub const KING_VALUE: i32 = 100_000;

/// Bonus for any piece standing on a centre square.
pub const CENTER_BONUS: i32 = 10;

const CENTER: [Square; 4] = [
    Square::new(File::D, Rank::R4),
    Square::new(File::E, Rank::R4),
    Square::new(File::D, Rank::R5),
    Square::new(File::E, Rank::R5),
];

/// Material value of a piece kind.
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Evaluates the position: positive favours White.
pub fn evaluate(position: &Position) -> i32 {
    Color::BOTH
        .iter()
        .map(|&color| {
            let sign = if color == Color::White { 1 } else { -1 };
            let side: i32 = position
                .pieces(color)
                .map(|(sq, piece)| {
                    let centre = if CENTER.contains(&sq) { CENTER_BONUS } else { 0 };
                    piece_value(piece.kind) + centre
                })
                .sum();
            sign * side
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(evaluate(&Position::startpos()), 0);
    }

    #[test]
    fn material_counts_for_white_positive() {
        // White has an extra queen.
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&pos), QUEEN_VALUE);
        let pos = Position::from_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&pos), -QUEEN_VALUE);
    }

    #[test]
    fn centre_bonus_is_signed_by_colour() {
        let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&pos), PAWN_VALUE + CENTER_BONUS);
        let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&pos), 0);
    }

    #[test]
    fn side_to_move_does_not_matter() {
        let white = Position::from_fen("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let black = Position::from_fen("4k3/8/8/8/4N3/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&white), evaluate(&black));
        assert_eq!(evaluate(&white), KNIGHT_VALUE + CENTER_BONUS);
    }
}
