//! Game status detection.

use crate::movegen::{has_legal_move, in_check};
use crate::Position;
use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    /// The given side is in check and has a legal reply.
    Check(Color),
    /// The given side is checkmated.
    Checkmate(Color),
    Stalemate,
}

impl GameStatus {
    /// Returns true if the game cannot continue.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }

    /// Returns the winner, if the game ended in checkmate.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate(loser) => Some(loser.opposite()),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "Game in progress."),
            GameStatus::Check(color) => write!(f, "Check! {} is in check!", color),
            GameStatus::Checkmate(color) => write!(f, "Checkmate! {} wins!", color.opposite()),
            GameStatus::Stalemate => write!(f, "Stalemate! It's a draw!"),
        }
    }
}

/// Classifies the position from the point of view of the side to move.
pub fn evaluate_status(position: &Position) -> GameStatus {
    let side = position.side_to_move;
    let checked = in_check(position, side);
    match (checked, has_legal_move(position)) {
        (true, true) => GameStatus::Check(side),
        (true, false) => GameStatus::Checkmate(side),
        (false, true) => GameStatus::Ongoing,
        (false, false) => GameStatus::Stalemate,
    }
}
