//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the rules.

use super::legal_moves;
use crate::execute::apply;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&apply(position, m), depth - 1))
        .sum()
}

/// Perft with divide: node count below each root move, keyed by the move
/// in coordinate notation and sorted by it.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = legal_moves(position)
        .iter()
        .map(|m| {
            let nodes = if depth > 1 {
                perft(&apply(position, m), depth - 1)
            } else {
                1
            };
            (m.mv.to_string(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
