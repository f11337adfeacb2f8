//! Player records.

/// Identifier of a player, `0..num_players`.
///
/// Ids stay stable for the whole game; elimination only flips liveness so
/// turn order remains well defined.
pub type PlayerId = u8;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 8;

/// State for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Whether the player still owns at least one territory.
    pub alive: bool,
}

impl Player {
    /// Create a new, alive player.
    #[must_use]
    pub const fn new(id: PlayerId) -> Self {
        Self { id, alive: true }
    }

    /// Eliminate this player.
    pub fn eliminate(&mut self) {
        self.alive = false;
    }
}
