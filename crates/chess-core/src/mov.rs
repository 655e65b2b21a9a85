//! Move representation.

use crate::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a move, derived by the engine when it validates a
/// request. Callers never supply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal = 0,
    /// Pawn advance of two squares from its starting row.
    DoubleStep = 1,
    /// Diagonal pawn capture of a pawn that just double-stepped past.
    EnPassant = 2,
    /// Kingside castling (O-O).
    CastleKingside = 3,
    /// Queenside castling (O-O-O).
    CastleQueenside = 4,
}

impl MoveFlag {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A move request: origin, destination and an optional promotion choice.
///
/// The promotion kind is meaningful only when a pawn reaches the farthest
/// rank. Whether the request is legal, and what kind of move it is, is
/// decided by the engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move request without a promotion choice.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a move request carrying a promotion choice.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Parses a request from two squares in file/rank notation, e.g. ("E2", "E4").
    pub fn from_squares(from: &str, to: &str) -> Option<Self> {
        Some(Move::new(
            Square::from_algebraic(from)?,
            Square::from_algebraic(to)?,
        ))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.to_char().to_ascii_uppercase())?;
        }
        Ok(())
    }
}
