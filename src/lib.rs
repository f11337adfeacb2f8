// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Conquest: a deterministic engine for Risk-like territorial conquest games.
//!
//! This crate provides the authoritative rules of the game:
//! - Board graphs of territories grouped into bonus-bearing continents
//! - Seeded, reproducible dice and initial deal
//! - Reinforcement, combat, fortification and turn order
//! - Pluggable decision providers and a simulation driver
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI (run / tournament)          │
//! ├─────────────────────────────────────┤
//! │   Simulation  ·  Agents             │
//! ├─────────────────────────────────────┤
//! │   Turn controller (Game)            │
//! ├─────────────────────────────────────┤
//! │   Rules over Board + GameState      │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use conquest::{Board, Game, Phase};
//!
//! let mut game = Game::seeded(Board::classic().unwrap(), 3, 42).unwrap();
//! let player = game.current_player();
//! assert_eq!(game.phase(), Phase::Reinforce);
//!
//! let available = game.get_reinforcements(player);
//! let home = game.state().owned_by(player).next().unwrap();
//! game.reinforce(player, &[conquest::Placement::new(home, available)]).unwrap();
//! assert_eq!(game.phase(), Phase::Attack);
//! ```

pub mod agent;
pub mod error;
pub mod game;
pub mod simulation;

pub use error::{BoardError, RuleViolation, SetupError};

// Re-export key game types at crate root for convenience
pub use game::{
    Action, AttackReport, Board, DieSource, Game, GameState, Phase, Placement, PlayerId,
    TerritoryId,
};
