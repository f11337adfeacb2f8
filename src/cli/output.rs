//! Output formatting utilities for CLI.

use conquest::simulation::GameResult;
use conquest::{Board, PlayerId};
use serde::Serialize;

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Random seed used.
    pub(super) seed: u64,
    /// Winner player ID (null if draw).
    pub(super) winner: Option<PlayerId>,
    /// Total rounds played.
    pub(super) turns_played: u32,
    /// Dice exchanges resolved.
    pub(super) attacks: u32,
    /// Exchanges that captured a territory.
    pub(super) captures: u32,
    /// Agent actions the engine refused.
    pub(super) rejected_actions: u32,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayerResult>,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerResult {
    /// Player ID (0-based seat).
    pub(super) id: PlayerId,
    /// Territories held at the end.
    pub(super) territories: usize,
    /// Units on the board at the end.
    pub(super) units: u64,
    /// Round eliminated (null if survived).
    pub(super) eliminated_turn: Option<u32>,
}

impl JsonGameResult {
    /// Create from a `GameResult`.
    pub(super) fn from_game_result(result: &GameResult) -> Self {
        Self {
            seed: result.seed,
            winner: result.winner,
            turns_played: result.turns_played,
            attacks: result.attacks,
            captures: result.captures,
            rejected_actions: result.rejected_actions,
            players: (0..result.final_territories.len())
                .map(|seat| {
                    let id = seat_id(seat);
                    JsonPlayerResult {
                        id,
                        territories: result.final_territories[seat],
                        units: units_of(result, id),
                        eliminated_turn: eliminated_turn(result, id),
                    }
                })
                .collect(),
        }
    }
}

/// Player id for a seat index; seats never exceed `PlayerId::MAX`.
fn seat_id(seat: usize) -> PlayerId {
    PlayerId::try_from(seat).unwrap_or(PlayerId::MAX)
}

fn units_of(result: &GameResult, player: PlayerId) -> u64 {
    result
        .final_board
        .iter()
        .filter(|row| row.owner == player)
        .map(|row| u64::from(row.units))
        .sum()
}

fn eliminated_turn(result: &GameResult, player: PlayerId) -> Option<u32> {
    result
        .eliminations
        .iter()
        .find(|e| e.player == player)
        .map(|e| e.turn)
}

/// Format a game result as human-readable text.
///
/// The final board table is included unless `brief` is set.
pub(super) fn format_text(result: &GameResult, board: &Board, brief: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {})\n", result.seed));
    if let Some(winner) = result.winner {
        output.push_str(&format!("  Winner: Player {winner}\n"));
    } else {
        output.push_str("  Winner: Draw\n");
    }
    output.push_str(&format!("  Rounds: {}\n", result.turns_played));
    output.push_str(&format!(
        "  Attacks: {} ({} captures, {} rejected actions)\n\n",
        result.attacks, result.captures, result.rejected_actions
    ));

    for (seat, territories) in result.final_territories.iter().enumerate() {
        let id = seat_id(seat);
        output.push_str(&format!(
            "  Player {id}: {territories} territories, {} units",
            units_of(result, id)
        ));
        if let Some(turn) = eliminated_turn(result, id) {
            output.push_str(&format!(" [eliminated round {turn}]"));
        }
        output.push('\n');
    }

    if brief {
        return output;
    }

    let width = result
        .final_board
        .iter()
        .map(|row| row.name.len())
        .max()
        .unwrap_or(0)
        .max("Territory".len());

    output.push_str("\nFinal Board:\n");
    output.push_str(&format!(
        "  {:<width$}  {:<16}  {:>5}  {:>5}\n",
        "Territory", "Continent", "Owner", "Units"
    ));
    for (id, row) in result.final_board.iter().enumerate() {
        output.push_str(&format!(
            "  {:<width$}  {:<16}  {:>5}  {:>5}\n",
            row.name,
            board.continent_of(id).name,
            row.owner,
            row.units
        ));
    }

    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct TournamentStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Win count per seat.
    pub(super) wins: Vec<u64>,
    /// Draw count.
    pub(super) draws: u64,
    /// Total rounds across all games.
    total_turns: u64,
    /// Total rounds across decided games.
    decisive_turns: u64,
    /// Total dice exchanges.
    total_attacks: u64,
    /// Total rejected agent actions.
    total_rejected: u64,
    /// Games that failed to set up.
    pub(super) failures: u64,
}

impl TournamentStats {
    /// Create new stats for n players.
    pub(super) fn new(num_players: usize) -> Self {
        Self {
            wins: vec![0; num_players],
            ..Self::default()
        }
    }

    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);
        self.total_attacks += u64::from(result.attacks);
        self.total_rejected += u64::from(result.rejected_actions);

        if let Some(winner) = result.winner {
            self.decisive_turns += u64::from(result.turns_played);
            if let Some(wins) = self.wins.get_mut(usize::from(winner)) {
                *wins += 1;
            }
        } else {
            self.draws += 1;
        }
    }

    /// Fold another thread's stats into these.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.total_turns += other.total_turns;
        self.decisive_turns += other.decisive_turns;
        self.total_attacks += other.total_attacks;
        self.total_rejected += other.total_rejected;
        self.failures += other.failures;
        if self.wins.len() < other.wins.len() {
            self.wins.resize(other.wins.len(), 0);
        }
        for (mine, theirs) in self.wins.iter_mut().zip(&other.wins) {
            *mine += theirs;
        }
    }

    /// Get win rate for a seat (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn win_rate(&self, seat: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(seat).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Get draw rate (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn draw_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.draws as f64 / self.games_played as f64
    }

    /// Get average game length.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }

    /// Get average length of games that produced a winner.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_decisive_turns(&self) -> f64 {
        let decided = self.games_played - self.draws;
        if decided == 0 {
            return 0.0;
        }
        self.decisive_turns as f64 / decided as f64
    }

    /// Get average dice exchanges per game.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_attacks(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_attacks as f64 / self.games_played as f64
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Board the games were played on.
    map: String,
    /// Total games played.
    games_played: u64,
    /// Per-seat statistics.
    players: Vec<JsonTournamentPlayer>,
    /// Number of draws.
    draws: u64,
    /// Average game length in rounds.
    avg_turns: f64,
    /// Average length of decided games in rounds.
    avg_decisive_turns: f64,
    /// Average dice exchanges per game.
    avg_attacks: f64,
    /// Agent actions the engine refused, summed over all games.
    rejected_actions: u64,
    /// Games that failed to set up.
    failures: u64,
}

/// JSON-serializable per-seat tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentPlayer {
    /// Seat index (0-based).
    player: usize,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
}

impl JsonTournamentResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &TournamentStats, map: &str) -> Self {
        let players = (0..stats.wins.len())
            .map(|seat| JsonTournamentPlayer {
                player: seat,
                wins: stats.wins[seat],
                win_rate: stats.win_rate(seat),
            })
            .collect();

        Self {
            map: map.to_string(),
            games_played: stats.games_played,
            players,
            draws: stats.draws,
            avg_turns: stats.avg_turns(),
            avg_decisive_turns: stats.avg_decisive_turns(),
            avg_attacks: stats.avg_attacks(),
            rejected_actions: stats.total_rejected,
            failures: stats.failures,
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, map: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Tournament Results ({} games on {map})\n",
        stats.games_played
    ));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (seat, wins) in stats.wins.iter().enumerate() {
        let rate = stats.win_rate(seat) * 100.0;
        output.push_str(&format!("  Player {seat}: {rate:.1}% ({wins} wins)\n"));
    }
    output.push_str(&format!(
        "  Draws: {} ({:.1}%)\n\n",
        stats.draws,
        stats.draw_rate() * 100.0
    ));

    output.push_str(&format!(
        "Average Game Length: {:.0} rounds ({:.0} when decided)\n",
        stats.avg_turns(),
        stats.avg_decisive_turns()
    ));
    output.push_str(&format!(
        "Average Exchanges: {:.0} per game\n",
        stats.avg_attacks()
    ));
    if stats.total_rejected > 0 {
        output.push_str(&format!(
            "Rejected Actions: {}\n",
            stats.total_rejected
        ));
    }
    if stats.failures > 0 {
        output.push_str(&format!("Failed Games: {}\n", stats.failures));
    }

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("player,wins,win_rate\n");

    // Data rows
    for (seat, wins) in stats.wins.iter().enumerate() {
        output.push_str(&format!("{seat},{wins},{:.4}\n", stats.win_rate(seat)));
    }
    output.push_str(&format!("draw,{},{:.4}\n", stats.draws, stats.draw_rate()));

    output
}
