//! Configuration file loading for the terminal host.
//!
//! Settings come from `chess.toml` in the current directory when it exists;
//! every field is optional and command-line flags override the file.

use chess_core::Color;
use chess_engine::SearchLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The search depth must be at least one ply.
    #[error("search_depth must be at least 1, got {0}")]
    InvalidDepth(u32),
}

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Plies searched by the engine.
    pub search_depth: u32,
    /// Side played by the engine; absent for two human players.
    pub ai_color: Option<Color>,
    /// Node budget per engine move.
    pub max_nodes: Option<u64>,
    /// Wall-clock budget per engine move, in milliseconds.
    pub time_budget_ms: Option<u64>,
    /// Log level for stderr output (error, warn, info, debug, trace).
    pub log_level: String,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            search_depth: SearchLimits::DEFAULT_DEPTH,
            ai_color: None,
            max_nodes: None,
            time_budget_ms: None,
            log_level: "warn".to_string(),
        }
    }
}

impl PlayConfig {
    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it contains invalid TOML, or
    /// [`ConfigError::InvalidDepth`] for a zero search depth.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validated()
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }

    /// Checks values that parse but make no sense.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::InvalidDepth(self.search_depth));
        }
        Ok(self)
    }

    /// Search limits for one engine move.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            depth: self.search_depth,
            max_nodes: self.max_nodes,
            time_budget: self.time_budget_ms.map(Duration::from_millis),
        }
    }
}
