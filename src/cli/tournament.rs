//! Tournament command implementation.

use super::output::{
    JsonTournamentResult, TournamentStats, format_tournament_csv, format_tournament_text,
};
use super::{CliError, TournamentFormat, load_board, map_name, resolve_seed};
use conquest::simulation::{SimulationConfig, run_random_game};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded or cannot seat the players.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    map: Option<&Path>,
    players: usize,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_turns: Option<u32>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let board = load_board(map)?;

    let mut config = SimulationConfig {
        num_players: players,
        ..SimulationConfig::default()
    };
    if let Some(t) = max_turns {
        config.max_turns = t;
    }

    // Check the board can seat everyone before going parallel
    run_random_game(
        &board,
        0,
        &SimulationConfig {
            max_turns: 0,
            ..config
        },
    )?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(seed);

    let pb = progress.then(|| {
        let pb = ProgressBar::new(games);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})",
        ) {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    });

    let start = Instant::now();

    // Each thread accumulates into its own TournamentStats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || TournamentStats::new(players),
            |mut local_stats, i| {
                let game_seed = base_seed.wrapping_add(i);
                match run_random_game(&board, game_seed, &config) {
                    Ok(result) => local_stats.add_result(&result),
                    Err(e) => {
                        log::warn!("game {game_seed} failed: {e}");
                        local_stats.failures += 1;
                    }
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local_stats
            },
        )
        .reduce(
            || TournamentStats::new(players),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    let map = map_name(map);
    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, &map));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec, base seed {base_seed})",
                duration.as_secs_f64(),
            );
        }
        TournamentFormat::Json => {
            let json_result = JsonTournamentResult::from_stats(&stats, &map);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats));
        }
    }

    Ok(())
}
