//! Legal move enumeration.
//!
//! Every consumer that needs "all legal moves" (status detection, perft,
//! the search) goes through [`legal_moves`], which asks the validator about
//! each origin/destination pair. Promotions are expanded into one move per
//! promotion choice.

mod attacks;
pub mod movement;
pub mod perft;

use crate::validate::{validate, LegalMove};
use crate::Position;
use chess_core::{Move, PieceKind, Square};

pub use attacks::{attacks, in_check, square_attacked};
pub use movement::can_move;

/// Generates all legal moves for the side to move.
///
/// Moves are ordered by origin square, then destination square, then
/// promotion choice (queen, rook, bishop, knight).
pub fn legal_moves(position: &Position) -> Vec<LegalMove> {
    let mut moves = Vec::with_capacity(48);
    for (from, _) in position.pieces(position.side_to_move) {
        for to in Square::all() {
            push_legal(position, Move::new(from, to), &mut moves);
        }
    }
    moves
}

/// Generates the legal moves of the piece on `from`.
pub fn legal_moves_from(position: &Position, from: Square) -> Vec<LegalMove> {
    let mut moves = Vec::new();
    for to in Square::all() {
        push_legal(position, Move::new(from, to), &mut moves);
    }
    moves
}

/// Returns true if the side to move has at least one legal move.
pub fn has_legal_move(position: &Position) -> bool {
    position.pieces(position.side_to_move).any(|(from, _)| {
        Square::all().any(|to| validate(position, Move::new(from, to)).is_ok())
    })
}

fn push_legal(position: &Position, mv: Move, moves: &mut Vec<LegalMove>) {
    let Ok(legal) = validate(position, mv) else {
        return;
    };
    if legal.is_complete() {
        moves.push(legal);
    } else {
        moves.extend(
            PieceKind::PROMOTION_CHOICES
                .iter()
                .map(|&kind| legal.promoting_to(kind)),
        );
    }
}
