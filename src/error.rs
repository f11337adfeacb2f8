//! Error types for the conquest engine.
//!
//! Two classes are kept apart:
//! - [`RuleViolation`]: an expected, recoverable rejection of an action.
//!   The game state is never modified when one is returned.
//! - [`BoardError`] and [`SetupError`]: broken input data or game setup.
//!   These abort construction.

use std::path::PathBuf;

use crate::game::{Phase, PlayerId, TerritoryId};

/// Reason an action was rejected by the rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// The territory is not owned by the acting player.
    #[error("territory {territory} is not owned by player {player}")]
    NotOwned {
        /// Acting player.
        player: PlayerId,
        /// Territory the player tried to use.
        territory: TerritoryId,
    },
    /// The attack target is already owned by the attacker.
    #[error("player {player} cannot attack its own territory {territory}")]
    OwnTerritory {
        /// Acting player.
        player: PlayerId,
        /// Targeted territory.
        territory: TerritoryId,
    },
    /// The two territories do not share a border.
    #[error("territories {from} and {to} are not adjacent")]
    NotAdjacent {
        /// Attacking territory.
        from: TerritoryId,
        /// Targeted territory.
        to: TerritoryId,
    },
    /// The attacking territory cannot spare a unit.
    #[error("territory {territory} has {units} unit(s), at least 2 are needed to attack")]
    InsufficientUnits {
        /// Attacking territory.
        territory: TerritoryId,
        /// Units currently stationed there.
        units: u32,
    },
    /// The declared attacking force is empty or leaves nothing behind.
    #[error("cannot commit {requested} unit(s) to an attack, {available} available")]
    InvalidCommitment {
        /// Units declared.
        requested: u32,
        /// Units that may leave the source territory.
        available: u32,
    },
    /// More reinforcements requested than granted.
    #[error("requested {requested} reinforcement(s), only {available} available")]
    InsufficientReinforcements {
        /// Sum of requested placements.
        requested: u32,
        /// Reinforcements granted this turn.
        available: u32,
    },
    /// No path of the player's own territories joins the two territories.
    #[error("territories {from} and {to} are not connected through owned territory")]
    Disconnected {
        /// Fortify source.
        from: TerritoryId,
        /// Fortify destination.
        to: TerritoryId,
    },
    /// No territory carries this name.
    #[error("no territory named {0:?}")]
    TerritoryNotFound(String),
    /// The action belongs to a different phase of the turn.
    #[error("action requires the {expected:?} phase, game is in {actual:?}")]
    WrongPhase {
        /// Phase the action belongs to.
        expected: Phase,
        /// Phase the game is in.
        actual: Phase,
    },
    /// Someone acted out of turn.
    #[error("player {player} acted during player {current}'s turn")]
    NotYourTurn {
        /// Player that tried to act.
        player: PlayerId,
        /// Player whose turn it is.
        current: PlayerId,
    },
    /// The single fortification of this turn was already made.
    #[error("already fortified this turn")]
    AlreadyFortified,
    /// The game has a winner.
    #[error("the game is over")]
    GameOver,
}

/// Malformed board description.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The board file could not be read.
    #[error("failed to read board {}: {source}", path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid JSON or misses required fields.
    #[error("invalid board document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The board has no territories.
    #[error("board declares no territories")]
    Empty,
    /// A continent lists a territory missing from the territory section.
    #[error("continent {continent:?} lists undeclared territory {territory:?}")]
    UndeclaredTerritory {
        /// Listed territory name.
        territory: String,
        /// Continent listing it.
        continent: String,
    },
    /// A territory is listed under two continents.
    #[error("territory {territory:?} is listed under both {first:?} and {second:?}")]
    DuplicateMembership {
        /// Territory name.
        territory: String,
        /// First continent listing it.
        first: String,
        /// Second continent listing it.
        second: String,
    },
    /// A territory belongs to no continent.
    #[error("territory {territory:?} is not listed under any continent")]
    Unassigned {
        /// Territory name.
        territory: String,
    },
    /// A neighbor reference does not resolve.
    #[error("territory {territory:?} lists unknown neighbor {neighbor:?}")]
    UnknownNeighbor {
        /// Territory whose neighbor list is broken.
        territory: String,
        /// Name that did not resolve.
        neighbor: String,
    },
    /// A territory lists itself as neighbor.
    #[error("territory {territory:?} lists itself as a neighbor")]
    SelfAdjacent {
        /// Territory name.
        territory: String,
    },
}

/// Invalid game setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Fewer than two players.
    #[error("too few players: {0} (minimum 2)")]
    TooFewPlayers(usize),
    /// More players than the engine or board supports.
    #[error("too many players: {players} (maximum {limit})")]
    TooManyPlayers {
        /// Requested player count.
        players: usize,
        /// Largest supported count for this board.
        limit: usize,
    },
    /// An explicit position does not cover the board exactly.
    #[error("expected {expected} garrisons, got {actual}")]
    GarrisonCountMismatch {
        /// Territories on the board.
        expected: usize,
        /// Garrisons supplied.
        actual: usize,
    },
    /// A garrison names a player outside the game.
    #[error("territory {territory} is owned by unknown player {owner}")]
    UnknownOwner {
        /// Territory index.
        territory: TerritoryId,
        /// Owner given.
        owner: PlayerId,
    },
    /// The opening player is not seated.
    #[error("player {0} is not seated in this game")]
    UnknownPlayer(PlayerId),
    /// The opening player owns no territory.
    #[error("player {0} owns no territory and cannot open the game")]
    DeadPlayer(PlayerId),
    /// A garrison holds no units.
    #[error("territory {territory} has no units")]
    EmptyGarrison {
        /// Territory index.
        territory: TerritoryId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_violation_display() {
        let err = RuleViolation::NotAdjacent { from: 3, to: 7 };
        assert_eq!(err.to_string(), "territories 3 and 7 are not adjacent");

        let err = RuleViolation::TerritoryNotFound("Atlantis".to_string());
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_board_error_from_json() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = BoardError::from(parse);
        assert!(matches!(err, BoardError::Parse(_)));
        assert!(err.to_string().starts_with("invalid board document"));
    }

    #[test]
    fn test_setup_error_display() {
        let err = SetupError::TooManyPlayers {
            players: 9,
            limit: 8,
        };
        assert_eq!(err.to_string(), "too many players: 9 (maximum 8)");
    }
}
