//! Standard chess rules.

use super::RuleSet;
use crate::execute::apply;
use crate::movegen::{in_check, legal_moves};
use crate::status::{evaluate_status, GameStatus};
use crate::validate::{validate, LegalMove, Rejection};
use crate::Position;
use chess_core::Move;

/// Standard chess rules: piece movement, castling, en passant, promotion,
/// check, checkmate and stalemate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn legal_moves(&self, position: &Position) -> Vec<LegalMove> {
        legal_moves(position)
    }

    fn validate(&self, position: &Position, m: Move) -> Result<LegalMove, Rejection> {
        validate(position, m)
    }

    fn make_move(&self, position: &Position, m: &LegalMove) -> Position {
        apply(position, m)
    }

    fn is_check(&self, position: &Position) -> bool {
        in_check(position, position.side_to_move)
    }

    fn status(&self, position: &Position) -> GameStatus {
        evaluate_status(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, PieceKind, Square};

    fn mv(from: &str, to: &str) -> Move {
        Move::from_squares(from, to).unwrap()
    }

    #[test]
    fn initial_position() {
        let pos = StandardChess.initial_position();
        assert_eq!(pos.to_fen(), chess_core::FenParser::STARTPOS);
        assert!(!StandardChess.is_check(&pos));
        assert!(!StandardChess.is_game_over(&pos));
    }

    #[test]
    fn try_make_move_applies_legal_moves() {
        let pos = StandardChess.initial_position();
        let next = StandardChess.try_make_move(&pos, mv("e2", "e4")).unwrap();
        assert_eq!(next.side_to_move, Color::Black);
        assert_eq!(
            StandardChess.try_make_move(&pos, mv("e2", "e5")),
            Err(Rejection::IllegalShapeOrBlocked)
        );
    }

    #[test]
    fn try_make_move_requires_promotion_choice() {
        let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        assert_eq!(
            StandardChess.try_make_move(&pos, mv("e7", "e8")),
            Err(Rejection::PromotionRequiredButMissing)
        );
        let e7 = Square::from_algebraic("e7").unwrap();
        let next = StandardChess
            .try_make_move(&pos, Move::with_promotion(e7, Square::E8, PieceKind::Rook))
            .unwrap();
        assert_eq!(next.piece_at(Square::E8).map(|p| p.kind), Some(PieceKind::Rook));
    }

    #[test]
    fn game_over_on_mate() {
        let pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        assert!(StandardChess.is_check(&pos));
        assert!(StandardChess.is_game_over(&pos));
        assert!(StandardChess.legal_moves(&pos).is_empty());
    }
}
