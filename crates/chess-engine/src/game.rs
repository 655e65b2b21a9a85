//! Game session with history tracking.
//!
//! [`Game`] owns everything that lives between two calls into the rules:
//! the current position, the snapshot stack used by undo, the move log and
//! the pending promotion square.

use crate::execute::complete_promotion;
use crate::rules::{RuleSet, StandardChess};
use crate::status::GameStatus;
use crate::validate::{LegalMove, Rejection};
use crate::Position;
use chess_core::{Move, MoveFlag, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A recorded move in game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The piece that moved (a pawn, for promotions).
    pub piece: Piece,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<Piece>,
    pub flag: MoveFlag,
    /// The promotion choice, once made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl From<&LegalMove> for MoveRecord {
    fn from(legal: &LegalMove) -> Self {
        MoveRecord {
            from: legal.from(),
            to: legal.to(),
            piece: legal.piece,
            captured: legal.captured,
            flag: legal.flag,
            promotion: legal.mv.promotion,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.captured.is_some() { 'x' } else { '-' };
        write!(f, "{} {}{}{}", self.piece, self.from, sep, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.to_char().to_ascii_uppercase())?;
        }
        match self.flag {
            MoveFlag::EnPassant => write!(f, " e.p."),
            MoveFlag::CastleKingside => write!(f, " (O-O)"),
            MoveFlag::CastleQueenside => write!(f, " (O-O-O)"),
            _ => Ok(()),
        }
    }
}

/// What happened after a move was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The turn passed; the status is that of the new side to move.
    Completed(GameStatus),
    /// A pawn reached the last rank and waits on this square for a piece.
    PromotionPending(Square),
}

/// Error type for game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("Pawn promotion pending on {0}!")]
    PromotionPending(Square),

    #[error("No pawn is waiting for promotion!")]
    NoPromotionPending,

    #[error("Nothing to undo!")]
    UndoAtInitialPosition,

    #[error("Game is over! Please restart ({0})")]
    GameOver(GameStatus),
}

/// Why a saved session was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("history has {snapshots} positions but {moves} moves")]
    HistoryMismatch { snapshots: usize, moves: usize },

    #[error("promotion pending on {0} with no move to complete")]
    PendingWithoutMove(Square),

    #[error("no pawn waiting for promotion on {0}")]
    PendingWithoutPawn(Square),
}

/// A chess game with undo history.
///
/// Deserialization checks that the history is consistent and that a pending
/// promotion names a pawn of the side to move on its last rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SavedGame")]
pub struct Game {
    /// Position the game started from; `reset` returns here.
    start: Position,
    /// Current position.
    position: Position,
    /// Position before each recorded move.
    snapshots: Vec<Position>,
    /// Moves played, parallel to `snapshots`.
    moves: Vec<MoveRecord>,
    /// Square of a pawn waiting for its promotion piece.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pending_promotion: Option<Square>,
}

/// Unchecked shape of a saved [`Game`].
#[derive(Deserialize)]
struct SavedGame {
    start: Position,
    position: Position,
    snapshots: Vec<Position>,
    moves: Vec<MoveRecord>,
    #[serde(default)]
    pending_promotion: Option<Square>,
}

impl TryFrom<SavedGame> for Game {
    type Error = SessionError;

    fn try_from(saved: SavedGame) -> Result<Self, Self::Error> {
        if saved.snapshots.len() != saved.moves.len() {
            return Err(SessionError::HistoryMismatch {
                snapshots: saved.snapshots.len(),
                moves: saved.moves.len(),
            });
        }
        if let Some(sq) = saved.pending_promotion {
            if saved.moves.last().map(|record| record.to) != Some(sq) {
                return Err(SessionError::PendingWithoutMove(sq));
            }
            let mover = saved.position.side_to_move;
            let pawn = Piece::new(mover, PieceKind::Pawn);
            if saved.position.piece_at(sq) != Some(pawn) || sq.row() != mover.promotion_row() {
                return Err(SessionError::PendingWithoutPawn(sq));
            }
        }
        Ok(Game {
            start: saved.start,
            position: saved.position,
            snapshots: saved.snapshots,
            moves: saved.moves,
            pending_promotion: saved.pending_promotion,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(StandardChess.initial_position())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        Game {
            start: position.clone(),
            position,
            snapshots: Vec::new(),
            moves: Vec::new(),
            pending_promotion: None,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, chess_core::FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the starting position.
    pub fn start_position(&self) -> &Position {
        &self.start
    }

    /// Returns the square of a pawn waiting for promotion, if any.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Returns the status of the side to move.
    ///
    /// Evaluation is deferred while a promotion is pending, which reports
    /// [`GameStatus::Ongoing`].
    pub fn status(&self) -> GameStatus {
        if self.pending_promotion.is_some() {
            GameStatus::Ongoing
        } else {
            StandardChess.status(&self.position)
        }
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.status().is_terminal()
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        if self.pending_promotion.is_some() {
            return Vec::new();
        }
        StandardChess.legal_moves(&self.position)
    }

    /// Returns the move history, oldest first.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Submits a move request for the side to move.
    ///
    /// On rejection the position is left untouched.
    pub fn submit(&mut self, m: Move) -> Result<MoveOutcome, GameError> {
        if let Some(sq) = self.pending_promotion {
            return Err(GameError::PromotionPending(sq));
        }

        // A finished game has no legal moves, so the status is only
        // needed once the move has been refused.
        let legal = match StandardChess.validate(&self.position, m) {
            Ok(legal) => legal,
            Err(reason) => {
                let status = StandardChess.status(&self.position);
                if status.is_terminal() {
                    return Err(GameError::GameOver(status));
                }
                tracing::debug!(mv = %m, %reason, "move rejected");
                return Err(reason.into());
            }
        };

        let next = StandardChess.make_move(&self.position, &legal);
        self.snapshots.push(std::mem::replace(&mut self.position, next));
        self.moves.push(MoveRecord::from(&legal));

        if legal.is_complete() {
            Ok(MoveOutcome::Completed(self.status()))
        } else {
            self.pending_promotion = Some(legal.to());
            Ok(MoveOutcome::PromotionPending(legal.to()))
        }
    }

    /// Supplies the piece for a pending promotion and passes the turn.
    pub fn promote(&mut self, kind: PieceKind) -> Result<MoveOutcome, GameError> {
        let sq = self.pending_promotion.ok_or(GameError::NoPromotionPending)?;
        if !kind.is_promotion_choice() {
            return Err(Rejection::InvalidPromotion.into());
        }

        self.position = complete_promotion(&self.position, sq, kind);
        if let Some(record) = self.moves.last_mut() {
            record.promotion = Some(kind);
        }
        self.pending_promotion = None;
        Ok(MoveOutcome::Completed(self.status()))
    }

    /// Takes back the last move.
    ///
    /// Undoing while a promotion is pending takes back the pawn move.
    pub fn undo(&mut self) -> Result<MoveRecord, GameError> {
        if self.snapshots.is_empty() || self.moves.is_empty() {
            return Err(GameError::UndoAtInitialPosition);
        }
        match (self.snapshots.pop(), self.moves.pop()) {
            (Some(before), Some(record)) => {
                self.position = before;
                self.pending_promotion = None;
                Ok(record)
            }
            _ => Err(GameError::UndoAtInitialPosition),
        }
    }

    /// Returns to the starting position and clears the history.
    pub fn reset(&mut self) {
        self.position = self.start.clone();
        self.snapshots.clear();
        self.moves.clear();
        self.pending_promotion = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    fn mv(from: &str, to: &str) -> Move {
        Move::from_squares(from, to).unwrap()
    }

    fn play(game: &mut Game, moves: &[(&str, &str)]) {
        for (from, to) in moves {
            game.submit(mv(from, to)).unwrap();
        }
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_game_over());
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert_eq!(game.pending_promotion(), None);
    }

    #[test]
    fn submit_records_history() {
        let mut game = Game::new();
        play(&mut game, &[("e2", "e4"), ("e7", "e5"), ("g1", "f3")]);

        let history = game.move_history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].to_string(), "wP e2-e4");
        assert_eq!(history[1].piece, Piece::new(Color::Black, PieceKind::Pawn));
        assert_eq!(history[2].to_string(), "wN g1-f3");
    }

    #[test]
    fn illegal_move_leaves_game_untouched() {
        let mut game = Game::new();
        let before = game.clone();
        assert_eq!(
            game.submit(mv("e2", "e5")),
            Err(GameError::Rejected(Rejection::IllegalShapeOrBlocked))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
        let outcome = game.submit(mv("d8", "h4")).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Completed(GameStatus::Checkmate(Color::White))
        );
        assert!(game.is_game_over());
        assert_eq!(
            game.submit(mv("a2", "a3")),
            Err(GameError::GameOver(GameStatus::Checkmate(Color::White)))
        );
    }

    #[test]
    fn stalemate() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn undo_restores_position() {
        let mut game = Game::new();
        play(&mut game, &[("e2", "e4"), ("d7", "d5")]);
        let before = game.position().clone();
        game.submit(mv("e4", "d5")).unwrap();

        let record = game.undo().unwrap();
        assert_eq!(record.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(game.position(), &before);
        assert_eq!(game.ply_count(), 2);
    }

    #[test]
    fn undo_at_initial_position() {
        let mut game = Game::new();
        assert_eq!(game.undo(), Err(GameError::UndoAtInitialPosition));
    }

    #[test]
    fn undo_after_checkmate_resumes_play() {
        let mut game = Game::new();
        play(
            &mut game,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );
        assert!(game.is_game_over());
        game.undo().unwrap();
        assert!(!game.is_game_over());
        assert_eq!(game.position().side_to_move, Color::Black);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut game = Game::new();
        play(&mut game, &[("e2", "e4"), ("e7", "e5")]);
        game.reset();
        assert_eq!(game.position(), &Position::startpos());
        assert!(game.move_history().is_empty());
        assert_eq!(game.undo(), Err(GameError::UndoAtInitialPosition));
    }

    #[test]
    fn promotion_pending_then_completed() {
        let mut game = Game::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let outcome = game.submit(mv("e7", "e8")).unwrap();
        assert_eq!(outcome, MoveOutcome::PromotionPending(Square::E8));
        assert_eq!(game.pending_promotion(), Some(Square::E8));
        assert_eq!(game.position().side_to_move, Color::White);

        assert_eq!(
            game.submit(mv("e1", "d1")),
            Err(GameError::PromotionPending(Square::E8))
        );

        let outcome = game.promote(PieceKind::Queen).unwrap();
        assert_eq!(outcome, MoveOutcome::Completed(GameStatus::Ongoing));
        assert_eq!(
            game.position().piece_at(Square::E8),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(game.position().side_to_move, Color::Black);
        assert_eq!(game.move_history()[0].to_string(), "wP e7-e8=Q");
    }

    #[test]
    fn promote_without_pending() {
        let mut game = Game::new();
        assert_eq!(
            game.promote(PieceKind::Queen),
            Err(GameError::NoPromotionPending)
        );
    }

    #[test]
    fn promote_rejects_king() {
        let mut game = Game::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        game.submit(mv("e7", "e8")).unwrap();
        assert_eq!(
            game.promote(PieceKind::King),
            Err(GameError::Rejected(Rejection::InvalidPromotion))
        );
        assert_eq!(game.pending_promotion(), Some(Square::E8));
    }

    #[test]
    fn undo_while_pending_takes_back_pawn() {
        let mut game = Game::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        game.submit(mv("e7", "e8")).unwrap();
        game.undo().unwrap();
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(
            game.position().piece_at(Square::from_algebraic("e7").unwrap()),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            GameError::from(Rejection::NotYourTurn).to_string(),
            "It's not your turn!"
        );
        assert_eq!(
            GameError::GameOver(GameStatus::Stalemate).to_string(),
            "Game is over! Please restart (Stalemate! It's a draw!)"
        );
    }

    #[test]
    fn serde_round_trip_preserves_session() {
        let mut game = Game::new();
        play(&mut game, &[("e2", "e4"), ("c7", "c5")]);
        let json = serde_json::to_string(&game).unwrap();
        let mut restored: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, game);
        restored.undo().unwrap();
        assert_eq!(restored.ply_count(), 1);
    }

    #[test]
    fn serde_keeps_a_pending_promotion() {
        let mut game = Game::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        game.submit(mv("e7", "e8")).unwrap();
        let json = serde_json::to_string(&game).unwrap();
        let mut restored: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.pending_promotion(), Some(Square::E8));
        restored.promote(PieceKind::Rook).unwrap();
        assert_eq!(restored.position().side_to_move, Color::Black);
    }

    fn saved_after_e4() -> serde_json::Value {
        let mut game = Game::new();
        game.submit(mv("e2", "e4")).unwrap();
        serde_json::to_value(&game).unwrap()
    }

    #[test]
    fn serde_rejects_history_length_mismatch() {
        let mut saved = saved_after_e4();
        saved["moves"] = serde_json::json!([]);
        let err = serde_json::from_value::<Game>(saved).unwrap_err();
        assert!(err.to_string().contains("history has 1 positions but 0 moves"));
    }

    #[test]
    fn serde_rejects_pending_square_without_pawn() {
        let mut saved = saved_after_e4();
        saved["moves"][0]["to"] = serde_json::json!("e8");
        saved["pending_promotion"] = serde_json::json!("e8");
        let err = serde_json::from_value::<Game>(saved).unwrap_err();
        assert!(err.to_string().contains("no pawn waiting for promotion on e8"));
    }

    #[test]
    fn serde_rejects_pending_square_off_the_last_move() {
        let mut saved = saved_after_e4();
        saved["pending_promotion"] = serde_json::json!("e8");
        let err = serde_json::from_value::<Game>(saved).unwrap_err();
        assert!(err.to_string().contains("promotion pending on e8 with no move"));
    }

    #[test]
    fn serde_rejects_pending_with_empty_history() {
        let mut saved = serde_json::to_value(Game::new()).unwrap();
        saved["pending_promotion"] = serde_json::json!("e8");
        assert!(serde_json::from_value::<Game>(saved).is_err());
    }

    #[test]
    fn serde_rejects_pawn_short_of_the_last_rank() {
        let mut saved = saved_after_e4();
        // Black is to move and its e7 pawn is nowhere near rank 1.
        saved["moves"][0]["to"] = serde_json::json!("e7");
        saved["pending_promotion"] = serde_json::json!("e7");
        assert!(serde_json::from_value::<Game>(saved).is_err());
    }

    #[test]
    fn game_over_is_reported_before_the_rejection() {
        let mut game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(
            game.submit(mv("h8", "h7")),
            Err(GameError::GameOver(GameStatus::Stalemate))
        );
        assert_eq!(
            game.submit(mv("a1", "a2")),
            Err(GameError::GameOver(GameStatus::Stalemate))
        );
    }
}
