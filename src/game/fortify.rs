//! Fortification: moving units between connected owned territories.

use crate::error::RuleViolation;
use crate::game::{Board, GameState, PlayerId, TerritoryId, is_link};

/// Move up to `amount` units from `from` to `to`.
///
/// The amount is clamped so one unit stays at the source. Returns the number
/// of units actually moved, which may be zero. Fortifying a territory onto
/// itself moves nothing.
///
/// # Errors
///
/// - [`RuleViolation::NotOwned`] if either territory belongs to someone else.
/// - [`RuleViolation::Disconnected`] if no owned path joins them.
///
/// # Panics
///
/// Panics if either territory is outside the board.
pub fn fortify(
    board: &Board,
    state: &mut GameState,
    player: PlayerId,
    from: TerritoryId,
    to: TerritoryId,
    amount: u32,
) -> Result<u32, RuleViolation> {
    board.check(from);
    board.check(to);

    for territory in [from, to] {
        if state.owner(territory) != player {
            return Err(RuleViolation::NotOwned { player, territory });
        }
    }
    if from == to {
        return Ok(0);
    }
    if !is_link(board, state, player, from, to) {
        return Err(RuleViolation::Disconnected { from, to });
    }

    let moved = amount.min(state.units(from) - 1);
    state.garrison_mut(from).units -= moved;
    let target = state.garrison_mut(to);
    target.units = target.units.saturating_add(moved);
    Ok(moved)
}
