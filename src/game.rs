//! Game layer for Conquest.
//!
//! Implements the rules of territorial conquest on a graph board:
//! - Board graph loaded from a JSON document
//! - Game state (owner and units per territory, player liveness)
//! - Reinforcement, combat, connectivity and fortification rules
//! - Turn controller enforcing the phase sequence

mod action;
mod combat;
mod connectivity;
mod description;
mod dice;
mod fortify;
pub mod invariants;
mod map;
mod player;
mod reinforcement;
mod state;
mod turn;

pub use action::{Action, AttackOrder, FortifyOrder, Placement, ReinforceOrder};
pub use combat::{
    AttackReport, Exchange, MAX_ATTACK_DICE, MAX_DEFENSE_DICE, attack, check_attack, compare_dice,
    roll_exchange,
};
pub use connectivity::{FortifyPaths, components, get_fortify_paths, is_link};
pub use description::{BoardDescription, ContinentDescription, TerritoryDescription};
pub use dice::{DIE_FACES, DieSource, ScriptedDice};
pub use fortify::fortify;
pub use map::{Board, Continent, ContinentId, Territory, TerritoryId};
pub use player::{MAX_PLAYERS, Player, PlayerId};
pub use reinforcement::{
    MIN_REINFORCEMENTS, UNITS_PER_REINFORCEMENT, continent_bonus, controlled_continents,
    get_reinforcements, reinforce,
};
pub use state::{GameState, Garrison, TerritorySnapshot};
pub use turn::{ActionOutcome, Game, Phase};

#[cfg(test)]
pub(crate) use map::line_board;
