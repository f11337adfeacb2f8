//! Simulation driver for complete games.
//!
//! Provides a pure function interface: `(board, agents, seed) -> GameResult`.
//!
//! The driver handles:
//! - Dealing a seeded game
//! - Asking each agent for its actions, phase by phase
//! - Counting actions the engine rejects (never fatal)
//! - Stopping at victory or the round limit

use std::sync::Arc;

use serde::Serialize;

use crate::agent::{Agent, RandomAgent, View};
use crate::error::{RuleViolation, SetupError};
use crate::game::{Board, Game, Phase, PlayerId, TerritorySnapshot};

/// Configuration for simulated games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Players seated by [`run_random_game`].
    pub num_players: usize,
    /// Rounds before the game is declared a draw.
    pub max_turns: u32,
    /// Attack declarations an agent may make per turn.
    pub max_attacks_per_turn: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_players: 4,
            max_turns: 500,
            max_attacks_per_turn: 64,
        }
    }
}

/// Error type for simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The game could not be dealt.
    #[error(transparent)]
    Setup(#[from] SetupError),
    /// The turn controller refused a phase transition of the driver itself.
    #[error("turn controller rejected the driver: {0}")]
    Driver(#[from] RuleViolation),
}

/// A player leaving the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Elimination {
    /// Eliminated player.
    pub player: PlayerId,
    /// Round in which it happened.
    pub turn: u32,
}

/// Final result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// The winning player (None if the round limit was hit).
    pub winner: Option<PlayerId>,
    /// Completed rounds.
    pub turns_played: u32,
    /// Elimination order (first eliminated is index 0).
    pub eliminations: Vec<Elimination>,
    /// Territories held by each player at the end.
    pub final_territories: Vec<usize>,
    /// Dice exchanges resolved.
    pub attacks: u32,
    /// Exchanges that captured a territory.
    pub captures: u32,
    /// Agent actions the engine refused.
    pub rejected_actions: u32,
    /// Board at the end of the game.
    pub final_board: Vec<TerritorySnapshot>,
}

impl GameResult {
    /// Check whether the game ended without a winner.
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Running counters for one game.
#[derive(Debug, Default)]
struct Tally {
    eliminations: Vec<Elimination>,
    attacks: u32,
    captures: u32,
    rejected: u32,
}

impl Tally {
    fn reject(&mut self, player: PlayerId, what: &str, err: &RuleViolation) {
        self.rejected += 1;
        log::debug!("player {player} {what} rejected: {err}");
    }
}

/// Seed for the agent in `seat`, derived from the game seed.
#[must_use]
pub fn agent_seed(seed: u64, seat: usize) -> u64 {
    seed ^ (seat as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Play one game between `agents`, one per seat.
///
/// # Determinism
///
/// Given the same board, seed and deterministic agents, this function
/// always produces the same `GameResult`.
///
/// # Errors
///
/// Returns an error if the board cannot seat `agents.len()` players.
pub fn run_game(
    board: &Arc<Board>,
    agents: &mut [Box<dyn Agent>],
    seed: u64,
    config: &SimulationConfig,
) -> Result<GameResult, SimulationError> {
    let mut game = Game::seeded(Arc::clone(board), agents.len(), seed)?;
    let mut tally = Tally::default();

    while !game.is_over() && game.turn() < config.max_turns {
        let player = game.current_player();
        let agent = &mut agents[usize::from(player)];
        play_turn(&mut game, agent.as_mut(), config, &mut tally)?;
    }

    let state = game.state();
    let winner = game.winner();
    match winner {
        Some(player) => log::info!(
            "game {seed}: player {player} wins after {} rounds",
            game.turn()
        ),
        None => log::info!("game {seed}: draw after {} rounds", game.turn()),
    }

    Ok(GameResult {
        seed,
        winner,
        turns_played: game.turn(),
        eliminations: tally.eliminations,
        final_territories: state
            .players()
            .iter()
            .map(|p| state.territory_count(p.id))
            .collect(),
        attacks: tally.attacks,
        captures: tally.captures,
        rejected_actions: tally.rejected,
        final_board: game.board_state(),
    })
}

/// Play one game between [`RandomAgent`]s seeded from `seed`.
///
/// # Errors
///
/// Returns an error if the board cannot seat `config.num_players`.
pub fn run_random_game(
    board: &Arc<Board>,
    seed: u64,
    config: &SimulationConfig,
) -> Result<GameResult, SimulationError> {
    let mut agents: Vec<Box<dyn Agent>> = (0..config.num_players)
        .map(|seat| Box::new(RandomAgent::new(agent_seed(seed, seat))) as Box<dyn Agent>)
        .collect();
    run_game(board, &mut agents, seed, config)
}

/// Drive one player's turn through all three phases.
fn play_turn(
    game: &mut Game,
    agent: &mut dyn Agent,
    config: &SimulationConfig,
    tally: &mut Tally,
) -> Result<(), RuleViolation> {
    let player = game.current_player();

    let available = game.get_reinforcements(player);
    let order = agent.reinforce(&View::new(game.board(), game.state(), player), available);
    if let Err(err) = game.reinforce(player, &order.placements) {
        tally.reject(player, "reinforcement", &err);
    }
    if game.phase() == Phase::Reinforce {
        game.end_phase(player)?;
    }

    for _ in 0..config.max_attacks_per_turn {
        let Some(order) = agent.attack(&View::new(game.board(), game.state(), player)) else {
            break;
        };
        match game.attack(player, order.from, order.to, order.committed) {
            Ok(report) => {
                tally.attacks += 1;
                if report.captured {
                    tally.captures += 1;
                }
                tally
                    .eliminations
                    .extend(report.eliminated.iter().map(|&eliminated| Elimination {
                        player: eliminated,
                        turn: game.turn(),
                    }));
                if report.victory() {
                    return Ok(());
                }
            }
            Err(err) => {
                tally.reject(player, "attack", &err);
                break;
            }
        }
    }
    game.end_phase(player)?;

    if let Some(order) = agent.fortify(&View::new(game.board(), game.state(), player)) {
        if let Err(err) = game.fortify(player, order.from, order.to, order.units) {
            tally.reject(player, "fortification", &err);
        }
    }
    game.end_phase(player)?;
    Ok(())
}
