//! Chess rules engine and minimax opponent.
//!
//! This crate provides:
//! - [`Position`] - board, side to move, castling rights and en passant target
//! - [`validate`] / [`apply`] - legal move validation and execution
//! - [`evaluate_status`] - check, checkmate and stalemate detection
//! - [`Game`] - a game session with undo history and pending promotion
//! - [`RuleSet`] - the rules as a trait, implemented by [`StandardChess`]
//! - [`choose_move`] - a fixed-depth minimax search with alpha-beta pruning
//!
//! # Architecture
//!
//! The board is a 64-square grid indexed in display order (a8 = 0, h1 = 63).
//! Legality is decided square pair by square pair: the movement predicate of
//! the piece, the special cases (castling, en passant, promotion), then a
//! check-safety test on a scratch copy of the position. Move enumeration,
//! status detection, perft and the search all reuse that one validator.
//!
//! # Example
//!
//! ```
//! use chess_core::Move;
//! use chess_engine::{choose_move, Game, MoveOutcome, SearchLimits};
//!
//! let mut game = Game::new();
//! let outcome = game.submit(Move::from_squares("e2", "e4").unwrap()).unwrap();
//! assert!(matches!(outcome, MoveOutcome::Completed(_)));
//!
//! let reply = choose_move(game.position(), &SearchLimits::default()).unwrap();
//! game.submit(reply.best.mv).unwrap();
//! assert_eq!(game.ply_count(), 2);
//! ```

mod execute;
mod game;
pub mod movegen;
mod position;
pub mod rules;
pub mod search;
mod status;
mod validate;

pub use execute::{apply, complete_promotion};
pub use game::{Game, GameError, MoveOutcome, MoveRecord, SessionError};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    attacks, can_move, has_legal_move, in_check, legal_moves, legal_moves_from, square_attacked,
};
pub use position::{CastlingRights, Position};
pub use rules::{RuleSet, StandardChess};
pub use search::{choose_move, evaluate, minimax, SearchLimits, SearchResult};
pub use status::{evaluate_status, GameStatus};
pub use validate::{validate, LegalMove, Rejection};
