//! Action records submitted by decision providers.
//!
//! Actions are inputs to the rule operations, never stored in the game state.

use serde::{Deserialize, Serialize};

use crate::game::TerritoryId;

/// Units to place on one territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Receiving territory.
    pub territory: TerritoryId,
    /// Units to add.
    pub units: u32,
}

impl Placement {
    /// Create a placement.
    #[must_use]
    pub const fn new(territory: TerritoryId, units: u32) -> Self {
        Self { territory, units }
    }
}

/// Where to put this turn's reinforcements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforceOrder {
    /// Individual placements. A territory may appear more than once.
    pub placements: Vec<Placement>,
}

impl ReinforceOrder {
    /// Place everything on a single territory.
    #[must_use]
    pub fn all_on(territory: TerritoryId, units: u32) -> Self {
        Self {
            placements: vec![Placement::new(territory, units)],
        }
    }

    /// Total units requested.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.placements
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(p.units))
    }
}

/// One attack declaration: a single dice exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOrder {
    /// Attacking territory.
    pub from: TerritoryId,
    /// Targeted territory.
    pub to: TerritoryId,
    /// Units committed to the attack. They advance into the target on capture.
    pub committed: u32,
}

/// A single fortification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortifyOrder {
    /// Territory units leave.
    pub from: TerritoryId,
    /// Territory units arrive at.
    pub to: TerritoryId,
    /// Units requested. Clamped so one unit stays behind.
    pub units: u32,
}

/// Anything a player can do on their turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Place reinforcements.
    Reinforce(ReinforceOrder),
    /// Declare an attack.
    Attack(AttackOrder),
    /// Move units between connected territories.
    Fortify(FortifyOrder),
    /// Finish the current phase.
    EndPhase,
    /// Hand the turn to the next player.
    EndTurn,
}
