//! Conquest CLI - Command-line interface for running and checking Conquest games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Conquest - A deterministic territorial-conquest game engine
#[derive(Parser, Debug)]
#[command(name = "conquest")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single game between random agents
    Run {
        /// Board document (default: the classic world map)
        #[arg(long)]
        map: Option<PathBuf>,

        /// Number of players (2-8)
        #[arg(short = 'n', long, default_value = "4")]
        players: usize,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum rounds (default: 500)
        #[arg(short, long, default_value = "500")]
        turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the preamble and the final board table
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run mass parallel games and aggregate statistics
    Tournament {
        /// Board document (default: the classic world map)
        #[arg(long)]
        map: Option<PathBuf>,

        /// Number of players (2-8)
        #[arg(short = 'n', long, default_value = "4")]
        players: usize,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum rounds per game (default: 500)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Validate a board document
    Validate {
        /// Board JSON file to validate
        #[arg(required = true)]
        map: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            map,
            players,
            seed,
            turns,
            format,
            quiet,
        } => cli::run::execute(map.as_deref(), players, seed, turns, format, quiet),

        Commands::Tournament {
            map,
            players,
            games,
            seed,
            threads,
            max_turns,
            format,
            progress,
        } => cli::tournament::execute(
            map.as_deref(),
            players,
            games,
            seed,
            threads,
            max_turns,
            format,
            progress,
        ),

        Commands::Validate { map } => cli::validate::execute(&map),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
