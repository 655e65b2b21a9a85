//! Rule set abstraction.
//!
//! The game session and the search engine talk to the rules through the
//! [`RuleSet`] trait rather than calling the validator and executor
//! directly.

mod standard;

pub use standard::StandardChess;

use crate::status::GameStatus;
use crate::validate::{LegalMove, Rejection};
use crate::Position;
use chess_core::Move;

/// Trait for a set of chess rules.
///
/// # Example
///
/// ```
/// use chess_engine::rules::RuleSet;
/// use chess_engine::StandardChess;
///
/// let position = StandardChess.initial_position();
/// let moves = StandardChess.legal_moves(&position);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the initial position.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves for the side to move.
    fn legal_moves(&self, position: &Position) -> Vec<LegalMove>;

    /// Validates a move request.
    fn validate(&self, position: &Position, m: Move) -> Result<LegalMove, Rejection>;

    /// Applies a validated move, returning the new position.
    fn make_move(&self, position: &Position, m: &LegalMove) -> Position;

    /// Validates and applies a complete move.
    ///
    /// A promotion without a chosen piece is rejected here, since a bare
    /// position cannot hold a pending promotion.
    fn try_make_move(&self, position: &Position, m: Move) -> Result<Position, Rejection> {
        let legal = self.validate(position, m)?;
        if !legal.is_complete() {
            return Err(Rejection::PromotionRequiredButMissing);
        }
        Ok(self.make_move(position, &legal))
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Returns the status of the side to move.
    fn status(&self, position: &Position) -> GameStatus;

    /// Returns true if the game is over.
    fn is_game_over(&self, position: &Position) -> bool {
        self.status(position).is_terminal()
    }
}
