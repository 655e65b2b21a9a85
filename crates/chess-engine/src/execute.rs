//! Move execution.
//!
//! [`apply`] produces the successor of a position for a validated move. It
//! trusts its input: only moves returned by
//! [`validate`](crate::validate::validate) may be passed in.

use crate::validate::{castle_rook_squares, LegalMove};
use crate::Position;
use chess_core::{Color, MoveFlag, Piece, PieceKind, Square};

/// Applies a validated move and returns the resulting position.
///
/// A promotion without a chosen piece leaves the pawn on the last rank and
/// does not pass the turn; [`complete_promotion`] finishes it.
pub fn apply(position: &Position, legal: &LegalMove) -> Position {
    let mut next = position.clone();
    let piece = legal.piece;
    let color = piece.color;

    if let Some(sq) = legal.captured_square() {
        next.set_piece(sq, None);
    }

    next.set_piece(legal.from(), None);
    let placed = match legal.mv.promotion {
        Some(kind) if legal.is_promotion() => Piece::new(color, kind),
        _ => piece,
    };
    next.set_piece(legal.to(), Some(placed));

    if let Some((rook_from, rook_to)) = castle_rook_squares(color, legal.flag) {
        let rook = next.set_piece(rook_from, None);
        next.set_piece(rook_to, rook);
    }

    if piece.kind == PieceKind::King {
        next.castling.remove_color(color);
    }
    next.castling.remove_for_rook_square(legal.from());
    next.castling.remove_for_rook_square(legal.to());

    next.en_passant = if legal.flag == MoveFlag::DoubleStep {
        legal.from().offset(color.pawn_direction(), 0)
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn || legal.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }

    if legal.is_complete() {
        pass_turn(&mut next);
    }

    tracing::trace!(mv = %legal.mv, fen = %next.to_fen(), "applied move");
    next
}

/// Replaces the pawn awaiting promotion on `sq` and passes the turn.
pub fn complete_promotion(position: &Position, sq: Square, kind: PieceKind) -> Position {
    let mut next = position.clone();
    next.set_piece(sq, Some(Piece::new(position.side_to_move, kind)));
    pass_turn(&mut next);
    tracing::trace!(square = %sq, ?kind, fen = %next.to_fen(), "completed promotion");
    next
}

fn pass_turn(position: &mut Position) {
    if position.side_to_move == Color::Black {
        position.fullmove_number += 1;
    }
    position.side_to_move = position.side_to_move.opposite();
}
