//! Reinforcement: how many units a player receives, and placing them.
//!
//! The grant is `max(3, units held / 3)` plus the bonus of every continent
//! the player holds completely. Note the base term counts units on the
//! board, not territories.

use crate::error::RuleViolation;
use crate::game::{Board, Continent, GameState, Placement, PlayerId};

/// Smallest grant a player ever receives.
pub const MIN_REINFORCEMENTS: u32 = 3;

/// Units held per reinforcement granted.
pub const UNITS_PER_REINFORCEMENT: u32 = 3;

/// Continents held completely by a player.
pub fn controlled_continents<'a>(
    board: &'a Board,
    state: &'a GameState,
    player: PlayerId,
) -> impl Iterator<Item = &'a Continent> + 'a {
    board.continents().iter().filter(move |continent| {
        state.garrisons()[continent.territories.clone()]
            .iter()
            .all(|g| g.owner == player)
    })
}

/// Sum of bonuses of the continents a player holds completely.
#[must_use]
pub fn continent_bonus(board: &Board, state: &GameState, player: PlayerId) -> u32 {
    controlled_continents(board, state, player).fold(0u32, |acc, c| acc.saturating_add(c.bonus))
}

/// Reinforcements a player may place at the start of their turn.
#[must_use]
pub fn get_reinforcements(board: &Board, state: &GameState, player: PlayerId) -> u32 {
    let base = u32::try_from(state.total_units(player) / u64::from(UNITS_PER_REINFORCEMENT))
        .unwrap_or(u32::MAX)
        .max(MIN_REINFORCEMENTS);
    base.saturating_add(continent_bonus(board, state, player))
}

/// Place reinforcements.
///
/// The whole request is validated before anything is placed.
/// Zero-unit placements on foreign territory are ignored.
///
/// Returns the number of units placed.
///
/// # Errors
///
/// - [`RuleViolation::InsufficientReinforcements`] if the placements add up
///   to more than [`get_reinforcements`] grants.
/// - [`RuleViolation::NotOwned`] if units go to a territory the player does
///   not own.
///
/// # Panics
///
/// Panics if a placement names a territory outside the board.
pub fn reinforce(
    board: &Board,
    state: &mut GameState,
    player: PlayerId,
    placements: &[Placement],
) -> Result<u32, RuleViolation> {
    for placement in placements {
        board.check(placement.territory);
    }

    let requested = placements
        .iter()
        .fold(0u32, |acc, p| acc.saturating_add(p.units));
    let available = get_reinforcements(board, state, player);
    if requested > available {
        return Err(RuleViolation::InsufficientReinforcements {
            requested,
            available,
        });
    }

    if let Some(foreign) = placements
        .iter()
        .find(|p| p.units > 0 && state.owner(p.territory) != player)
    {
        return Err(RuleViolation::NotOwned {
            player,
            territory: foreign.territory,
        });
    }

    for placement in placements {
        let garrison = state.garrison_mut(placement.territory);
        garrison.units = garrison.units.saturating_add(placement.units);
    }
    Ok(requested)
}
