//! CLI command implementations for Conquest.

pub(crate) mod run;
pub(crate) mod tournament;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use conquest::simulation::SimulationError;
use conquest::{Board, BoardError};
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BoardError> for CliError {
    fn from(e: BoardError) -> Self {
        Self::new(format!("Invalid board: {e}"))
    }
}

impl From<SimulationError> for CliError {
    fn from(e: SimulationError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load the board at `map`, or the classic world map.
pub(crate) fn load_board(map: Option<&Path>) -> Result<Arc<Board>, CliError> {
    let board = match map {
        Some(path) => Board::load(path)?,
        None => Board::classic()?,
    };
    Ok(Arc::new(board))
}

/// Use `seed`, or derive one from the clock.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| u64::try_from(d.as_nanos()).ok())
            .unwrap_or(42)
    })
}

/// Display name of a board document.
pub(crate) fn map_name(map: Option<&Path>) -> String {
    map.map_or_else(|| "classic".to_string(), |path| path.display().to_string())
}
