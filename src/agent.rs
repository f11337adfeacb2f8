//! Decision providers.
//!
//! The engine never asks who is playing. An [`Agent`] looks at a read-only
//! [`View`] of the game and produces action records; the simulation driver
//! feeds them to the turn controller, which alone decides legality.

mod random;

pub use random::RandomAgent;

use crate::game::{
    AttackOrder, Board, FortifyOrder, FortifyPaths, GameState, PlayerId, ReinforceOrder,
    TerritoryId, get_fortify_paths, get_reinforcements,
};

/// Read-only view of a game from one player's seat.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    board: &'a Board,
    state: &'a GameState,
    player: PlayerId,
}

impl<'a> View<'a> {
    /// Create a view for `player`.
    #[must_use]
    pub const fn new(board: &'a Board, state: &'a GameState, player: PlayerId) -> Self {
        Self {
            board,
            state,
            player,
        }
    }

    /// The board.
    #[must_use]
    pub const fn board(&self) -> &'a Board {
        self.board
    }

    /// The game state.
    #[must_use]
    pub const fn state(&self) -> &'a GameState {
        self.state
    }

    /// The seat this view belongs to.
    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    /// Territories this player owns.
    pub fn owned(&self) -> impl Iterator<Item = TerritoryId> + 'a {
        self.state.owned_by(self.player)
    }

    /// Every `(from, to)` pair this player could attack right now.
    #[must_use]
    pub fn attack_options(&self) -> Vec<(TerritoryId, TerritoryId)> {
        self.owned()
            .filter(|&from| self.state.units(from) >= 2)
            .flat_map(|from| {
                self.board
                    .neighbors(from)
                    .iter()
                    .filter(|&&to| self.state.owner(to) != self.player)
                    .map(move |&to| (from, to))
            })
            .collect()
    }

    /// Fortify capacities for this player.
    #[must_use]
    pub fn fortify_paths(&self) -> FortifyPaths {
        get_fortify_paths(self.board, self.state, self.player)
    }

    /// Reinforcements this player would receive now.
    #[must_use]
    pub fn reinforcements(&self) -> u32 {
        get_reinforcements(self.board, self.state, self.player)
    }
}

/// Something that chooses actions for one seat.
pub trait Agent {
    /// Distribute `available` reinforcements.
    fn reinforce(&mut self, view: &View<'_>, available: u32) -> ReinforceOrder;

    /// Declare the next attack, or `None` to stop attacking this turn.
    fn attack(&mut self, view: &View<'_>) -> Option<AttackOrder>;

    /// Choose this turn's fortification, if any.
    fn fortify(&mut self, view: &View<'_>) -> Option<FortifyOrder>;
}
