//! Terminal chess.
//!
//! Two players share the keyboard, or one plays against the minimax engine
//! when an engine colour is configured in `chess.toml` or with `--ai`.

mod command;
mod config;
mod host;

use anyhow::{anyhow, Context};
use chess_core::Color;
use chess_engine::Game;
use clap::{Parser, ValueEnum};
use config::PlayConfig;
use host::Host;
use std::path::PathBuf;

/// Side played by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AiSide {
    White,
    Black,
    None,
}

impl From<AiSide> for Option<Color> {
    fn from(side: AiSide) -> Self {
        match side {
            AiSide::White => Some(Color::White),
            AiSide::Black => Some(Color::Black),
            AiSide::None => None,
        }
    }
}

/// Play chess in the terminal.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess in the terminal, alone or against the engine")]
struct Args {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Engine search depth in plies
    #[arg(short, long)]
    depth: Option<u32>,

    /// Side played by the engine
    #[arg(long, value_enum)]
    ai: Option<AiSide>,

    /// Node budget per engine move
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Time budget per engine move in milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Start from this position instead of the initial one
    #[arg(long)]
    fen: Option<String>,
}

impl Args {
    /// Overrides file settings with the flags that were given.
    fn apply(&self, mut config: PlayConfig) -> PlayConfig {
        if let Some(depth) = self.depth {
            config.search_depth = depth;
        }
        if let Some(side) = self.ai {
            config.ai_color = side.into();
        }
        if self.max_nodes.is_some() {
            config.max_nodes = self.max_nodes;
        }
        if self.time_budget_ms.is_some() {
            config.time_budget_ms = self.time_budget_ms;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let path = args.config.clone().unwrap_or_else(PlayConfig::config_path);
    let config = args
        .apply(PlayConfig::load(&path).with_context(|| format!("loading {}", path.display()))?)
        .validated()?;

    let level: tracing::Level = config
        .log_level
        .parse()
        .map_err(|e| anyhow!("invalid log level {:?}: {}", config.log_level, e))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        depth = config.search_depth,
        ai = ?config.ai_color,
        max_nodes = ?config.max_nodes,
        time_budget_ms = ?config.time_budget_ms,
        "starting chess-play"
    );

    let game = match &args.fen {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("invalid FEN {:?}", fen))?,
        None => Game::new(),
    };

    let mut host = Host::new(game, config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    host.run(stdin.lock(), &mut stdout.lock())?;

    tracing::info!(
        plies = host.game().ply_count(),
        status = %host.game().status(),
        "session ended"
    );
    Ok(())
}
