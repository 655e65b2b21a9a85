//! Attack and check detection built on the movement predicates.

use super::movement::{is_diagonal, is_king_step, is_knight_jump, is_straight, path_clear};
use crate::Position;
use chess_core::{Color, Piece, PieceKind, Square};

/// Returns true if `piece` on `from` attacks `target`.
///
/// This is the capture geometry of the piece, independent of what stands on
/// `target`: a pawn attacks only its two forward diagonals, every other kind
/// attacks the squares it could move to along an unobstructed path.
/// En passant and castling never attack a square.
pub fn attacks(piece: Piece, from: Square, target: Square, position: &Position) -> bool {
    if from == target {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => {
            let (drow, dcol) = super::movement::delta(from, target);
            drow == piece.color.pawn_direction() && dcol.abs() == 1
        }
        PieceKind::Knight => is_knight_jump(from, target),
        PieceKind::Bishop => is_diagonal(from, target) && path_clear(from, target, position),
        PieceKind::Rook => is_straight(from, target) && path_clear(from, target, position),
        PieceKind::Queen => {
            (is_straight(from, target) || is_diagonal(from, target))
                && path_clear(from, target, position)
        }
        PieceKind::King => is_king_step(from, target),
    }
}

/// Returns true if the given square is attacked by any piece of `by_color`.
pub fn square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    position
        .pieces(by_color)
        .any(|(from, piece)| attacks(piece, from, sq, position))
}

/// Returns true if the king of the given color is in check.
///
/// A position without a king of `color` is corrupt; it is reported as check
/// so that no move is ever considered safe in it.
pub fn in_check(position: &Position, color: Color) -> bool {
    match position.king_square(color) {
        Some(king_sq) => square_attacked(position, king_sq, color.opposite()),
        None => {
            tracing::error!(%color, fen = %position.to_fen(), "no king on the board");
            true
        }
    }
}
