//! Core types for chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move requests and [`MoveFlag`] for their derived classification
//! - FEN parsing and serialization
//!
//! Squares are indexed by display row: row 0 is rank 8 (Black's back rank),
//! row 7 is rank 1 (White's back rank).

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
