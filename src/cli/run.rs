//! Run command implementation.

use super::output::{JsonGameResult, format_text};
use super::{CliError, OutputFormat, load_board, map_name, resolve_seed};
use conquest::simulation::{SimulationConfig, run_random_game};
use std::path::Path;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded or cannot seat the players.
pub(crate) fn execute(
    map: Option<&Path>,
    players: usize,
    seed: Option<u64>,
    turns: u32,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let board = load_board(map)?;
    let seed = resolve_seed(seed);

    let config = SimulationConfig {
        num_players: players,
        max_turns: turns,
        ..SimulationConfig::default()
    };

    if !quiet && format == OutputFormat::Text {
        println!("Running game with seed {seed}...");
        println!(
            "Board: {} ({} territories), {players} players",
            map_name(map),
            board.len()
        );
        println!();
    }

    let result = run_random_game(&board, seed, &config)?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result, &board, quiet));
        }
        OutputFormat::Json => {
            let json_result = JsonGameResult::from_game_result(&result);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
