//! Minimax search with alpha-beta pruning.
//!
//! The search works on immutable [`Position`] values and never touches a
//! game session, so callers may run it on a cloned snapshot in another
//! thread.

mod eval;

pub use eval::{evaluate, piece_value, CENTER_BONUS, KING_VALUE};

use crate::rules::{RuleSet, StandardChess};
use crate::validate::LegalMove;
use crate::Position;
use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Bounds on a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Search depth in plies (at least 1 is searched).
    pub depth: u32,
    /// Stop after visiting this many nodes.
    pub max_nodes: Option<u64>,
    /// Stop once this much wall-clock time has elapsed.
    pub time_budget: Option<Duration>,
}

impl SearchLimits {
    pub const DEFAULT_DEPTH: u32 = 2;

    /// Limits with only a depth bound.
    pub const fn depth(depth: u32) -> Self {
        SearchLimits {
            depth,
            max_nodes: None,
            time_budget: None,
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(Self::DEFAULT_DEPTH)
    }
}

/// The outcome of [`choose_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best: LegalMove,
    /// Score of `best`, White-positive.
    pub score: i32,
    /// Nodes visited.
    pub nodes: u64,
    /// False if a node or time limit cut the search short.
    pub completed: bool,
}

/// Search state
struct Searcher {
    nodes: u64,
    start_time: Instant,
    limits: SearchLimits,
    stopped: bool,
}

impl Searcher {
    fn new(limits: SearchLimits) -> Self {
        Searcher {
            nodes: 0,
            start_time: Instant::now(),
            limits,
            stopped: false,
        }
    }

    fn check_limits(&mut self) {
        let out_of_nodes = self.limits.max_nodes.is_some_and(|max| self.nodes > max);
        let out_of_time = self
            .limits
            .time_budget
            .is_some_and(|budget| self.start_time.elapsed() >= budget);
        if out_of_nodes || out_of_time {
            self.stopped = true;
        }
    }

    fn minimax(&mut self, position: &Position, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;
        self.check_limits();
        if self.stopped {
            return 0;
        }

        if depth == 0 {
            return evaluate(position);
        }

        let moves = StandardChess.legal_moves(position);
        if moves.is_empty() {
            return evaluate(position);
        }

        if position.side_to_move == Color::White {
            let mut best = i32::MIN;
            for m in &moves {
                let child = StandardChess.make_move(position, m);
                let score = self.minimax(&child, depth - 1, alpha, beta);
                if self.stopped {
                    return 0;
                }
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for m in &moves {
                let child = StandardChess.make_move(position, m);
                let score = self.minimax(&child, depth - 1, alpha, beta);
                if self.stopped {
                    return 0;
                }
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

/// Minimax value of `position` searched `depth` plies deep.
///
/// White maximizes and Black minimizes. Leaves and positions without a
/// legal move are scored by [`evaluate`].
pub fn minimax(position: &Position, depth: u32, alpha: i32, beta: i32) -> i32 {
    Searcher::new(SearchLimits::depth(depth)).minimax(position, depth, alpha, beta)
}

/// Picks a move for the side to move.
///
/// Each candidate is scored by a minimax search one ply shallower than
/// `limits.depth`; the best score for the side to move wins, earlier
/// candidates winning ties. Returns `None` if there is no legal move.
pub fn choose_move(position: &Position, limits: &SearchLimits) -> Option<SearchResult> {
    let moves = StandardChess.legal_moves(position);
    let first = *moves.first()?;

    let mut searcher = Searcher::new(*limits);
    let depth = limits.depth.max(1);
    let maximizing = position.side_to_move == Color::White;
    let mut best: Option<(LegalMove, i32)> = None;

    for m in &moves {
        let child = StandardChess.make_move(position, m);
        let score = searcher.minimax(&child, depth - 1, i32::MIN, i32::MAX);
        if searcher.stopped {
            break;
        }
        let improves = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((*m, score));
        }
    }

    let (best, score) = best.unwrap_or_else(|| {
        let child = StandardChess.make_move(position, &first);
        (first, evaluate(&child))
    });
    let result = SearchResult {
        best,
        score,
        nodes: searcher.nodes,
        completed: !searcher.stopped,
    };

    tracing::debug!(
        depth,
        nodes = result.nodes,
        score = result.score,
        best = %result.best.mv,
        completed = result.completed,
        elapsed_ms = searcher.start_time.elapsed().as_millis() as u64,
        "search finished"
    );

    Some(result)
}
