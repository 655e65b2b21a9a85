//! Per-piece movement predicates.
//!
//! Each predicate answers whether a piece of its kind may move from one
//! square to another in the given position, ignoring whether the mover's own
//! king is left in check. Castling is not a king move here; the validator
//! treats it separately.

use crate::Position;
use chess_core::{Piece, PieceKind, Square};

/// Returns true if `piece` standing on `from` may move to `to`.
pub fn can_move(piece: Piece, from: Square, to: Square, position: &Position) -> bool {
    if from == to {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn_can_move(piece, from, to, position),
        PieceKind::Knight => knight_can_move(piece, from, to, position),
        PieceKind::Bishop => bishop_can_move(piece, from, to, position),
        PieceKind::Rook => rook_can_move(piece, from, to, position),
        PieceKind::Queen => queen_can_move(piece, from, to, position),
        PieceKind::King => king_can_move(piece, from, to, position),
    }
}

/// Signed (row, col) distance from `from` to `to`.
#[inline]
pub(crate) fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

/// A destination is open unless a piece of the mover's own color stands on it.
#[inline]
fn destination_open(piece: Piece, to: Square, position: &Position) -> bool {
    position.piece_at(to).is_none_or(|occupant| occupant.color != piece.color)
}

/// True if every square strictly between `from` and `to` is empty.
///
/// The two squares must share a row, a column or a diagonal.
pub(crate) fn path_clear(from: Square, to: Square, position: &Position) -> bool {
    let (drow, dcol) = delta(from, to);
    let (step_row, step_col) = (drow.signum(), dcol.signum());
    let mut current = from.offset(step_row, step_col);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !position.is_empty(sq) {
            return false;
        }
        current = sq.offset(step_row, step_col);
    }
    false
}

#[inline]
pub(crate) fn is_straight(from: Square, to: Square) -> bool {
    let (drow, dcol) = delta(from, to);
    (drow == 0) != (dcol == 0)
}

#[inline]
pub(crate) fn is_diagonal(from: Square, to: Square) -> bool {
    let (drow, dcol) = delta(from, to);
    drow != 0 && drow.abs() == dcol.abs()
}

#[inline]
pub(crate) fn is_knight_jump(from: Square, to: Square) -> bool {
    let (drow, dcol) = delta(from, to);
    matches!((drow.abs(), dcol.abs()), (1, 2) | (2, 1))
}

#[inline]
pub(crate) fn is_king_step(from: Square, to: Square) -> bool {
    let (drow, dcol) = delta(from, to);
    from != to && drow.abs() <= 1 && dcol.abs() <= 1
}

/// Pawn moves: one step forward onto an empty square, two from the starting
/// row through an empty square, or one diagonal step forward as a capture.
///
/// A diagonal step onto an empty square is accepted only as an en passant
/// capture: the destination is the position's en passant target and an
/// opposing pawn stands beside the origin on the destination's file.
pub fn pawn_can_move(piece: Piece, from: Square, to: Square, position: &Position) -> bool {
    let dir = piece.color.pawn_direction();
    let (drow, dcol) = delta(from, to);

    if dcol == 0 {
        if drow == dir {
            return position.is_empty(to);
        }
        if drow == 2 * dir && from.row() == piece.color.pawn_start_row() {
            let skipped = from.offset(dir, 0);
            return skipped.is_some_and(|sq| position.is_empty(sq)) && position.is_empty(to);
        }
        return false;
    }

    if dcol.abs() != 1 || drow != dir {
        return false;
    }

    match position.piece_at(to) {
        Some(occupant) => occupant.color != piece.color,
        None => {
            position.en_passant == Some(to)
                && from.offset(0, dcol).and_then(|sq| position.piece_at(sq))
                    == Some(Piece::new(piece.color.opposite(), PieceKind::Pawn))
        }
    }
}

/// Rook moves: any distance along a row or column, stopped by the first
/// occupied square.
pub fn rook_can_move(piece: Piece, from: Square, to: Square, position: &Position) -> bool {
    is_straight(from, to) && path_clear(from, to, position) && destination_open(piece, to, position)
}

/// Bishop moves: any distance along a diagonal, stopped by the first
/// occupied square.
pub fn bishop_can_move(piece: Piece, from: Square, to: Square, position: &Position) -> bool {
    is_diagonal(from, to) && path_clear(from, to, position) && destination_open(piece, to, position)
}

/// Knight moves: a (1, 2) or (2, 1) jump; intervening pieces do not matter.
pub fn knight_can_move(piece: Piece, from: Square, to: Square, position: &Position) -> bool {
    is_knight_jump(from, to) && destination_open(piece, to, position)
}

/// Queen moves: rook or bishop lines.
pub fn queen_can_move(piece: Piece, from: Square, to: Square, position: &Position) -> bool {
    (is_straight(from, to) || is_diagonal(from, to))
        && path_clear(from, to, position)
        && destination_open(piece, to, position)
}

/// King moves: exactly one square in any direction.
pub fn king_can_move(piece: Piece, from: Square, to: Square, position: &Position) -> bool {
    is_king_step(from, to) && destination_open(piece, to, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn piece_on(position: &Position, s: &str) -> Piece {
        position.piece_at(sq(s)).unwrap()
    }

    fn moves(position: &Position, from: &str, to: &str) -> bool {
        can_move(piece_on(position, from), sq(from), sq(to), position)
    }

    #[test]
    fn pawn_single_and_double_step() {
        let pos = Position::startpos();
        assert!(moves(&pos, "e2", "e3"));
        assert!(moves(&pos, "e2", "e4"));
        assert!(!moves(&pos, "e2", "e5"));
        assert!(moves(&pos, "d7", "d6"));
        assert!(moves(&pos, "d7", "d5"));
    }

    #[test]
    fn pawn_never_moves_backward_or_sideways() {
        let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(!moves(&pos, "e4", "e3"));
        assert!(!moves(&pos, "e4", "d4"));
        assert!(!moves(&pos, "e4", "f4"));
        assert!(!moves(&pos, "e4", "e6"));
    }

    #[test]
    fn pawn_double_step_needs_both_squares_empty() {
        let blocked_near = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(!moves(&blocked_near, "e2", "e4"));
        assert!(!moves(&blocked_near, "e2", "e3"));

        let blocked_far = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(!moves(&blocked_far, "e2", "e4"));
        assert!(moves(&blocked_far, "e2", "e3"));
    }

    #[test]
    fn pawn_double_step_only_from_start_row() {
        let pos = Position::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        assert!(!moves(&pos, "e3", "e5"));
    }

    #[test]
    fn pawn_captures_only_diagonally() {
        let pos = Position::from_fen("4k3/8/8/3p1n2/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(moves(&pos, "e4", "d5"));
        assert!(moves(&pos, "e4", "f5"));
        assert!(moves(&pos, "e4", "e5"));

        let blocked = Position::from_fen("4k3/8/8/4p3/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(!moves(&blocked, "e4", "e5"));
        assert!(!moves(&blocked, "e4", "d5"));
    }

    #[test]
    fn pawn_does_not_capture_own_piece() {
        let pos = Position::from_fen("4k3/8/8/3N4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(!moves(&pos, "e4", "d5"));
    }

    #[test]
    fn pawn_en_passant_needs_target_and_adjacent_pawn() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert!(moves(&pos, "e5", "d6"));
        assert!(!moves(&pos, "e5", "f6"));

        let expired = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(!moves(&expired, "e5", "d6"));
    }

    #[test]
    fn black_pawn_moves_down_the_board() {
        let pos = Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();
        assert!(moves(&pos, "d4", "d3"));
        assert!(moves(&pos, "d4", "e3"));
        assert!(!moves(&pos, "d4", "d5"));
    }

    #[test]
    fn rook_lines_and_blocking() {
        let pos = Position::from_fen("4k3/8/8/8/R2p4/8/8/4K3 w - - 0 1").unwrap();
        assert!(moves(&pos, "a4", "a8"));
        assert!(moves(&pos, "a4", "a1"));
        assert!(moves(&pos, "a4", "c4"));
        assert!(moves(&pos, "a4", "d4"));
        assert!(!moves(&pos, "a4", "e4"));
        assert!(!moves(&pos, "a4", "b5"));
    }

    #[test]
    fn bishop_diagonals_and_blocking() {
        let pos = Position::from_fen("4k3/8/8/8/8/2P5/8/B3K3 w - - 0 1").unwrap();
        assert!(moves(&pos, "a1", "b2"));
        assert!(!moves(&pos, "a1", "c3"));
        assert!(!moves(&pos, "a1", "d4"));
        assert!(!moves(&pos, "a1", "a2"));
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let pos = Position::startpos();
        assert!(moves(&pos, "g1", "f3"));
        assert!(moves(&pos, "g1", "h3"));
        assert!(!moves(&pos, "g1", "e2"));
        assert!(!moves(&pos, "g1", "g3"));
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let pos = Position::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").unwrap();
        assert!(moves(&pos, "d4", "d8"));
        assert!(moves(&pos, "d4", "h8"));
        assert!(moves(&pos, "d4", "a1"));
        assert!(moves(&pos, "d4", "h4"));
        assert!(!moves(&pos, "d4", "e6"));
    }

    #[test]
    fn king_single_steps_only() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(moves(&pos, "e1", "e2"));
        assert!(moves(&pos, "e1", "f1"));
        assert!(moves(&pos, "e1", "d2"));
        // Castling is not part of the king predicate.
        assert!(!moves(&pos, "e1", "g1"));
    }

    #[test]
    fn same_square_is_never_a_move() {
        let pos = Position::startpos();
        assert!(!can_move(
            Piece::new(Color::White, PieceKind::Queen),
            Square::D1,
            Square::D1,
            &pos
        ));
    }
}
