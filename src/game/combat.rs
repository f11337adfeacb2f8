//! Combat resolution.
//!
//! One call to [`attack`] is one dice exchange. The caller decides whether
//! to keep declaring exchanges against the same pair of territories.
//!
//! The attacker rolls one die per committed unit, at most three. The
//! defender rolls one die per unit, at most two. Highest dice are compared
//! pairwise and ties go to the defender.

use crate::error::RuleViolation;
use crate::game::{Board, DieSource, GameState, PlayerId, TerritoryId};

/// Most dice an attacker may roll.
pub const MAX_ATTACK_DICE: u32 = 3;

/// Most dice a defender may roll.
pub const MAX_DEFENSE_DICE: u32 = 2;

/// Dice and casualties of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Attacker dice, sorted descending.
    pub attacker_dice: Vec<u32>,
    /// Defender dice, sorted descending.
    pub defender_dice: Vec<u32>,
    /// Units the attacker lost.
    pub attacker_losses: u32,
    /// Units the defender lost.
    pub defender_losses: u32,
}

impl Exchange {
    /// Number of dice pairs compared.
    #[must_use]
    pub fn pairs(&self) -> u32 {
        self.attacker_losses + self.defender_losses
    }
}

/// Outcome of one attack declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    /// The dice exchange.
    pub exchange: Exchange,
    /// Whether the target changed hands.
    pub captured: bool,
    /// Units that advanced into the captured territory.
    pub moved: u32,
    /// Players eliminated by the capture.
    pub eliminated: Vec<PlayerId>,
    /// Set when the capture left a single owner on the board.
    pub winner: Option<PlayerId>,
}

impl AttackReport {
    /// Check whether this attack won the game.
    #[must_use]
    pub const fn victory(&self) -> bool {
        self.winner.is_some()
    }
}

/// Compare two descending dice sets.
///
/// Returns `(attacker_losses, defender_losses)`.
#[must_use]
pub fn compare_dice(attacker: &[u32], defender: &[u32]) -> (u32, u32) {
    attacker
        .iter()
        .zip(defender)
        .fold((0, 0), |(lost, killed), (a, d)| {
            if a > d {
                (lost, killed + 1)
            } else {
                (lost + 1, killed)
            }
        })
}

/// Roll and compare one exchange.
///
/// Attacker dice are drawn before defender dice.
#[must_use]
pub fn roll_exchange<D: DieSource + ?Sized>(
    dice: &mut D,
    attacker_count: u32,
    defender_count: u32,
) -> Exchange {
    let mut attacker_dice: Vec<u32> = (0..attacker_count).map(|_| dice.die()).collect();
    let mut defender_dice: Vec<u32> = (0..defender_count).map(|_| dice.die()).collect();
    attacker_dice.sort_unstable_by(|a, b| b.cmp(a));
    defender_dice.sort_unstable_by(|a, b| b.cmp(a));

    let (attacker_losses, defender_losses) = compare_dice(&attacker_dice, &defender_dice);
    Exchange {
        attacker_dice,
        defender_dice,
        attacker_losses,
        defender_losses,
    }
}

/// Validate an attack declaration without rolling.
///
/// # Errors
///
/// Returns the first rule the declaration breaks.
///
/// # Panics
///
/// Panics if either territory is outside the board.
pub fn check_attack(
    board: &Board,
    state: &GameState,
    player: PlayerId,
    from: TerritoryId,
    to: TerritoryId,
    committed: u32,
) -> Result<(), RuleViolation> {
    board.check(from);
    board.check(to);

    if state.owner(from) != player {
        return Err(RuleViolation::NotOwned {
            player,
            territory: from,
        });
    }
    if state.owner(to) == player {
        return Err(RuleViolation::OwnTerritory {
            player,
            territory: to,
        });
    }
    if !board.are_adjacent(from, to) {
        return Err(RuleViolation::NotAdjacent { from, to });
    }
    let units = state.units(from);
    if units < 2 {
        return Err(RuleViolation::InsufficientUnits {
            territory: from,
            units,
        });
    }
    if committed == 0 || committed > units - 1 {
        return Err(RuleViolation::InvalidCommitment {
            requested: committed,
            available: units - 1,
        });
    }
    Ok(())
}

/// Resolve one attack declaration.
///
/// `committed` units fight; on capture the survivors among them advance
/// into the target. At least one unit always stays behind.
///
/// # Errors
///
/// Fails without touching the state if the declaration is illegal; see
/// [`check_attack`].
///
/// # Panics
///
/// Panics if either territory is outside the board.
pub fn attack<D: DieSource + ?Sized>(
    board: &Board,
    state: &mut GameState,
    dice: &mut D,
    player: PlayerId,
    from: TerritoryId,
    to: TerritoryId,
    committed: u32,
) -> Result<AttackReport, RuleViolation> {
    check_attack(board, state, player, from, to, committed)?;

    let defender = state.owner(to);
    let exchange = roll_exchange(
        dice,
        committed.min(MAX_ATTACK_DICE),
        state.units(to).min(MAX_DEFENSE_DICE),
    );
    log::debug!(
        "player {player} attacks {} -> {}: {:?} vs {:?}, losses {}/{}",
        board.name(from),
        board.name(to),
        exchange.attacker_dice,
        exchange.defender_dice,
        exchange.attacker_losses,
        exchange.defender_losses,
    );

    state.garrison_mut(from).units -= exchange.attacker_losses;
    state.garrison_mut(to).units -= exchange.defender_losses;

    let mut report = AttackReport {
        exchange,
        captured: false,
        moved: 0,
        eliminated: Vec::new(),
        winner: None,
    };
    if state.units(to) > 0 {
        return Ok(report);
    }

    // A capture means the defender lost a pair, so at least one committed
    // unit survived.
    let moved = committed - report.exchange.attacker_losses;
    state.garrison_mut(from).units -= moved;
    let target = state.garrison_mut(to);
    target.owner = player;
    target.units = moved;
    log::debug!(
        "player {player} captures {} from player {defender} with {moved} unit(s)",
        board.name(to),
    );

    report.captured = true;
    report.moved = moved;
    report.eliminated = state.check_elimination();
    for eliminated in &report.eliminated {
        log::info!("player {eliminated} eliminated by player {player}");
    }
    report.winner = state.check_winner();
    if let Some(winner) = report.winner {
        log::info!("player {winner} controls the whole board");
    }
    Ok(report)
}
