//! The interactive game loop.
//!
//! [`Host`] owns the game session and turns parsed [`Command`]s into calls on
//! it. Engine moves are searched on a worker thread over a cloned position,
//! so the live session is never shared.

use crate::command::{Command, HELP};
use crate::config::PlayConfig;
use anyhow::{anyhow, Context};
use chess_engine::{choose_move, Game, GameError, GameStatus, MoveOutcome, MoveRecord};
use std::io::{BufRead, Write};
use std::path::Path;

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Host {
    game: Game,
    config: PlayConfig,
}

impl Host {
    pub fn new(game: Game, config: PlayConfig) -> Self {
        Host { game, config }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{}", self.game.position())?;
        self.engine_reply(out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}> ", self.game.position().side_to_move)?;
            out.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(command, out)?,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Executes one command, writing user-facing messages to `out`.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<Flow> {
        match command {
            Command::Move(m) => match self.game.submit(m) {
                Ok(outcome) => {
                    self.report(outcome, out)?;
                    self.engine_reply(out)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Promote(kind) => match self.game.promote(kind) {
                Ok(outcome) => {
                    self.report(outcome, out)?;
                    self.engine_reply(out)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Undo => match self.take_back() {
                Ok(records) => {
                    for record in records {
                        writeln!(out, "Took back {}", record)?;
                    }
                    writeln!(out, "{}", self.game.position())?;
                    self.engine_reply(out)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Reset => {
                self.game.reset();
                writeln!(out, "New game.")?;
                writeln!(out, "{}", self.game.position())?;
                self.engine_reply(out)?;
            }
            Command::History => {
                if self.game.move_history().is_empty() {
                    writeln!(out, "No moves yet.")?;
                }
                for (ply, record) in self.game.move_history().iter().enumerate() {
                    writeln!(out, "{:>3}. {}", ply + 1, record)?;
                }
            }
            Command::Board => writeln!(out, "{}", self.game.position())?,
            Command::Status => self.print_status(out)?,
            Command::Ai => {
                if let Err(e) = self.engine_move(out) {
                    writeln!(out, "{:#}", e)?;
                }
            }
            Command::Save(path) => match self.save(&path) {
                Ok(()) => writeln!(out, "Saved to {}", path.display())?,
                Err(e) => writeln!(out, "{:#}", e)?,
            },
            Command::Load(path) => match self.load(&path) {
                Ok(()) => {
                    writeln!(out, "Loaded {}", path.display())?;
                    writeln!(out, "{}", self.game.position())?;
                    self.print_status(out)?;
                    self.engine_reply(out)?;
                }
                Err(e) => writeln!(out, "{:#}", e)?,
            },
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report<W: Write>(&self, outcome: MoveOutcome, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{}", self.game.position())?;
        match outcome {
            MoveOutcome::PromotionPending(sq) => {
                writeln!(out, "Pawn promotion pending on {}! Choose with: promote <q|r|b|n>", sq)?
            }
            MoveOutcome::Completed(GameStatus::Ongoing) => {}
            MoveOutcome::Completed(status) => writeln!(out, "{}", status)?,
        }
        Ok(())
    }

    fn print_status<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        if let Some(sq) = self.game.pending_promotion() {
            writeln!(out, "Pawn promotion pending on {}!", sq)?;
            return Ok(());
        }
        let status = self.game.status();
        match status {
            GameStatus::Ongoing => writeln!(
                out,
                "{} to move.",
                self.game.position().side_to_move
            )?,
            _ => writeln!(out, "{}", status)?,
        }
        Ok(())
    }

    /// Takes back the last ply, and the engine's ply before it when that
    /// would otherwise leave the engine's side to move.
    fn take_back(&mut self) -> Result<Vec<MoveRecord>, GameError> {
        let mut records = vec![self.game.undo()?];
        if self.config.ai_color == Some(self.game.position().side_to_move) {
            if let Ok(record) = self.game.undo() {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Moves for the engine if it plays the side to move.
    fn engine_reply<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        let engine_to_move = self.config.ai_color == Some(self.game.position().side_to_move);
        if engine_to_move
            && self.game.pending_promotion().is_none()
            && !self.game.is_game_over()
        {
            self.engine_move(out)?;
        }
        Ok(())
    }

    /// Searches on a worker thread and plays the chosen move.
    fn engine_move<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        if let Some(sq) = self.game.pending_promotion() {
            return Err(anyhow!("Pawn promotion pending on {}!", sq));
        }
        let status = self.game.status();
        if status.is_terminal() {
            return Err(anyhow!("Game is over! Please restart ({})", status));
        }

        let snapshot = self.game.position().clone();
        let limits = self.config.search_limits();
        let worker = std::thread::spawn(move || choose_move(&snapshot, &limits));
        let result = worker
            .join()
            .map_err(|_| anyhow!("search thread panicked"))?
            .ok_or_else(|| anyhow!("No legal moves."))?;

        tracing::info!(
            mv = %result.best.mv,
            score = result.score,
            nodes = result.nodes,
            completed = result.completed,
            "engine move"
        );
        let outcome = self.game.submit(result.best.mv)?;
        writeln!(out, "Engine plays {}", result.best)?;
        self.report(outcome, out)
    }

    fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.game)?;
        std::fs::write(path, json)
            .with_context(|| format!("Could not save to {}", path.display()))
    }

    fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        self.game = serde_json::from_str(&json)
            .with_context(|| format!("{} is not a saved game", path.display()))?;
        Ok(())
    }
}
