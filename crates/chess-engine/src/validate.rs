//! Legal move validation.
//!
//! [`validate`] turns a caller's [`Move`] request into a fully classified
//! [`LegalMove`], or explains why it is rejected. Pseudo-legality comes from
//! the movement predicates plus the special cases (castling, en passant,
//! promotion); the authoritative gate is the check-safety test run on a
//! scratch copy of the position.

use crate::execute;
use crate::movegen::movement::can_move;
use crate::movegen::{in_check, square_attacked};
use crate::Position;
use chess_core::{Color, Move, MoveFlag, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a move request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("No piece at starting position!")]
    NoPieceAtOrigin,

    #[error("It's not your turn!")]
    NotYourTurn,

    #[error("Invalid move!")]
    IllegalShapeOrBlocked,

    #[error("Illegal Move! This leaves you in Check!")]
    LeavesOwnKingInCheck,

    #[error("Castling is not allowed here!")]
    InvalidCastleConditions,

    #[error("A pawn reaching the last rank needs a promotion piece!")]
    PromotionRequiredButMissing,

    #[error("Invalid promotion!")]
    InvalidPromotion,
}

/// A move that passed validation, with its derived classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalMove {
    /// The request, including the promotion choice if one was given.
    pub mv: Move,
    /// The moving piece.
    pub piece: Piece,
    /// The captured piece, if any (the passed pawn for en passant).
    pub captured: Option<Piece>,
    /// Special-move classification.
    pub flag: MoveFlag,
}

impl LegalMove {
    #[inline]
    pub fn from(&self) -> Square {
        self.mv.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.mv.to
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns true if a pawn lands on the farthest rank.
    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.to().row() == self.piece.color.promotion_row()
    }

    /// Returns false for a promotion that still lacks its piece choice.
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.is_promotion() || self.mv.promotion.is_some()
    }

    /// Returns the square the captured piece is removed from.
    ///
    /// For en passant this is beside the origin, not the destination.
    pub fn captured_square(&self) -> Option<Square> {
        self.captured?;
        if self.flag == MoveFlag::EnPassant {
            Square::at(self.from().row(), self.to().col())
        } else {
            Some(self.to())
        }
    }

    /// Returns the same move with the promotion choice filled in.
    #[inline]
    pub fn promoting_to(mut self, kind: PieceKind) -> Self {
        self.mv.promotion = Some(kind);
        self
    }
}

impl std::fmt::Display for LegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.piece, self.mv)
    }
}

/// Validates a move request against full chess law.
///
/// A promotion move without a piece choice is accepted; the returned move
/// reports [`LegalMove::is_complete`] as false and the caller decides how to
/// obtain the choice.
pub fn validate(position: &Position, mv: Move) -> Result<LegalMove, Rejection> {
    let piece = position
        .piece_at(mv.from)
        .ok_or(Rejection::NoPieceAtOrigin)?;
    if piece.color != position.side_to_move {
        return Err(Rejection::NotYourTurn);
    }

    let legal = pseudo_legal(position, piece, mv)?;

    let after = execute::apply(position, &legal);
    if in_check(&after, piece.color) {
        return Err(Rejection::LeavesOwnKingInCheck);
    }

    Ok(legal)
}

/// Validates shape, path and special-move conditions, but not check safety.
fn pseudo_legal(position: &Position, piece: Piece, mv: Move) -> Result<LegalMove, Rejection> {
    let target = position.piece_at(mv.to);
    if target.is_some_and(|t| t.kind == PieceKind::King) {
        return Err(Rejection::IllegalShapeOrBlocked);
    }

    if let Some(flag) = castle_flag(piece, mv) {
        check_castle(position, piece.color, flag)?;
        if mv.promotion.is_some() {
            return Err(Rejection::InvalidPromotion);
        }
        return Ok(LegalMove {
            mv,
            piece,
            captured: None,
            flag,
        });
    }

    if !can_move(piece, mv.from, mv.to, position) {
        return Err(Rejection::IllegalShapeOrBlocked);
    }

    let mut legal = LegalMove {
        mv,
        piece,
        captured: target,
        flag: MoveFlag::Normal,
    };

    if piece.kind == PieceKind::Pawn {
        let row_distance = mv.to.row().abs_diff(mv.from.row());
        if row_distance == 2 {
            legal.flag = MoveFlag::DoubleStep;
        } else if target.is_none() && mv.from.col() != mv.to.col() {
            legal.flag = MoveFlag::EnPassant;
            legal.captured = Some(Piece::new(piece.color.opposite(), PieceKind::Pawn));
        }
    }

    match mv.promotion {
        Some(kind) if !legal.is_promotion() || !kind.is_promotion_choice() => {
            Err(Rejection::InvalidPromotion)
        }
        _ => Ok(legal),
    }
}

/// Recognizes a king moving two files along its home rank from its home square.
fn castle_flag(piece: Piece, mv: Move) -> Option<MoveFlag> {
    if piece.kind != PieceKind::King {
        return None;
    }
    let (home, kingside, queenside) = castle_squares(piece.color);
    if mv.from != home {
        return None;
    }
    if mv.to == kingside {
        Some(MoveFlag::CastleKingside)
    } else if mv.to == queenside {
        Some(MoveFlag::CastleQueenside)
    } else {
        None
    }
}

/// King home square and the two castling destinations for a color.
fn castle_squares(color: Color) -> (Square, Square, Square) {
    match color {
        Color::White => (Square::E1, Square::G1, Square::C1),
        Color::Black => (Square::E8, Square::G8, Square::C8),
    }
}

/// Rook home square and destination for a castling move.
pub(crate) fn castle_rook_squares(color: Color, flag: MoveFlag) -> Option<(Square, Square)> {
    match (color, flag) {
        (Color::White, MoveFlag::CastleKingside) => Some((Square::H1, Square::F1)),
        (Color::White, MoveFlag::CastleQueenside) => Some((Square::A1, Square::D1)),
        (Color::Black, MoveFlag::CastleKingside) => Some((Square::H8, Square::F8)),
        (Color::Black, MoveFlag::CastleQueenside) => Some((Square::A8, Square::D8)),
        _ => None,
    }
}

/// Castling needs the right, the rook in its corner, an empty path between
/// king and rook, and the king's start, transit and end squares unattacked.
fn check_castle(position: &Position, color: Color, flag: MoveFlag) -> Result<(), Rejection> {
    let has_right = match flag {
        MoveFlag::CastleKingside => position.castling.can_castle_kingside(color),
        _ => position.castling.can_castle_queenside(color),
    };
    let (rook_from, rook_to) =
        castle_rook_squares(color, flag).ok_or(Rejection::InvalidCastleConditions)?;
    let (king_from, _, _) = castle_squares(color);
    let king_to = if flag == MoveFlag::CastleKingside {
        king_from.offset(0, 2)
    } else {
        king_from.offset(0, -2)
    }
    .ok_or(Rejection::InvalidCastleConditions)?;

    let rook_present = position.piece_at(rook_from) == Some(Piece::new(color, PieceKind::Rook));
    if !has_right || !rook_present {
        tracing::debug!(%color, ?flag, has_right, rook_present, "castling right unavailable");
        return Err(Rejection::InvalidCastleConditions);
    }

    let step: i8 = if rook_from.col() > king_from.col() { 1 } else { -1 };
    let mut sq = king_from.offset(0, step);
    while let Some(between) = sq.filter(|s| *s != rook_from) {
        if !position.is_empty(between) {
            return Err(Rejection::InvalidCastleConditions);
        }
        sq = between.offset(0, step);
    }

    let them = color.opposite();
    let king_path = [king_from, rook_to, king_to];
    if king_path
        .iter()
        .any(|&s| square_attacked(position, s, them))
    {
        return Err(Rejection::InvalidCastleConditions);
    }

    Ok(())
}
