//! Game state management.
//!
//! [`GameState`] is the single source of truth for who holds which territory
//! with how many units. Its fields are private; only the rule operations of
//! this crate mutate it.

use serde::Serialize;

use crate::error::SetupError;
use crate::game::{Board, DieSource, MAX_PLAYERS, Player, PlayerId, TerritoryId};

/// Owner and unit count of one territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Garrison {
    /// Owning player.
    pub owner: PlayerId,
    /// Units stationed. At least 1 on a consistent board.
    pub units: u32,
}

impl Garrison {
    /// Create a garrison.
    #[must_use]
    pub const fn new(owner: PlayerId, units: u32) -> Self {
        Self { owner, units }
    }
}

/// One row of [`GameState::board_state`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerritorySnapshot {
    /// Territory name.
    pub name: String,
    /// Owning player.
    pub owner: PlayerId,
    /// Units stationed.
    pub units: u32,
}

/// Complete mutable game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Garrisons indexed by territory.
    garrisons: Vec<Garrison>,
    /// All players, indexed by id. Eliminated players stay in place.
    players: Vec<Player>,
    /// Player whose turn it is.
    current: PlayerId,
    /// Player who opened the first round.
    start: PlayerId,
    /// Completed rounds.
    turn: u32,
    /// Set once a single owner remains.
    winner: Option<PlayerId>,
}

impl GameState {
    /// Deal the board out to `num_players` players.
    ///
    /// Territories are shuffled and handed out round-robin with one unit
    /// each. The player after the last one dealt opens the game, so nobody
    /// is structurally favoured.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_players` is below 2 or above
    /// `min(MAX_PLAYERS, board.len())`.
    pub fn initialize<D: DieSource + ?Sized>(
        board: &Board,
        num_players: usize,
        dice: &mut D,
    ) -> Result<Self, SetupError> {
        validate_player_count(board, num_players)?;
        Ok(Self::deal(board, num_players, dice))
    }

    /// Shuffle and deal without validating the player count.
    pub(crate) fn deal<D: DieSource + ?Sized>(
        board: &Board,
        num_players: usize,
        dice: &mut D,
    ) -> Self {
        let mut order: Vec<TerritoryId> = (0..board.len()).collect();
        shuffle(&mut order, dice);

        let mut garrisons = vec![Garrison::new(0, 1); board.len()];
        for (dealt, &territory) in order.iter().enumerate() {
            garrisons[territory].owner = player_id(dealt % num_players);
        }

        let start = player_id(board.len() % num_players);
        Self {
            garrisons,
            players: (0..num_players).map(|id| Player::new(player_id(id))).collect(),
            current: start,
            start,
            turn: 0,
            winner: None,
        }
    }

    /// Build a state from an explicit position.
    ///
    /// Liveness is derived from ownership. `current` opens the round.
    ///
    /// # Errors
    ///
    /// Returns an error if the garrisons do not cover the board, name an
    /// unknown owner, hold no units, or if `current` is not a player or owns
    /// no territory.
    pub fn from_garrisons(
        board: &Board,
        garrisons: Vec<Garrison>,
        num_players: usize,
        current: PlayerId,
    ) -> Result<Self, SetupError> {
        validate_player_count(board, num_players)?;
        if garrisons.len() != board.len() {
            return Err(SetupError::GarrisonCountMismatch {
                expected: board.len(),
                actual: garrisons.len(),
            });
        }
        for (territory, garrison) in garrisons.iter().enumerate() {
            if usize::from(garrison.owner) >= num_players {
                return Err(SetupError::UnknownOwner {
                    territory,
                    owner: garrison.owner,
                });
            }
            if garrison.units == 0 {
                return Err(SetupError::EmptyGarrison { territory });
            }
        }
        if usize::from(current) >= num_players {
            return Err(SetupError::UnknownPlayer(current));
        }

        let players: Vec<Player> = (0..num_players)
            .map(|id| {
                let id = player_id(id);
                Player {
                    id,
                    alive: garrisons.iter().any(|g| g.owner == id),
                }
            })
            .collect();
        if !players[usize::from(current)].alive {
            return Err(SetupError::DeadPlayer(current));
        }

        Ok(Self {
            garrisons,
            players,
            current,
            start: current,
            turn: 0,
            winner: None,
        })
    }

    /// All garrisons in territory order.
    #[must_use]
    pub fn garrisons(&self) -> &[Garrison] {
        &self.garrisons
    }

    /// Garrison of one territory.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn garrison(&self, territory: TerritoryId) -> Garrison {
        self.garrisons[territory]
    }

    /// Owner of a territory.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn owner(&self, territory: TerritoryId) -> PlayerId {
        self.garrisons[territory].owner
    }

    /// Units on a territory.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn units(&self, territory: TerritoryId) -> u32 {
        self.garrisons[territory].units
    }

    /// All players, indexed by id.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of seats in the game, eliminated players included.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Check whether a player still owns territory. Unknown ids are not alive.
    #[must_use]
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.players
            .get(usize::from(player))
            .is_some_and(|p| p.alive)
    }

    /// Ids of players still in the game.
    pub fn alive_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().filter(|p| p.alive).map(|p| p.id)
    }

    /// Territories owned by a player.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = TerritoryId> + '_ {
        self.garrisons
            .iter()
            .enumerate()
            .filter(move |(_, g)| g.owner == player)
            .map(|(id, _)| id)
    }

    /// Number of territories owned by a player.
    #[must_use]
    pub fn territory_count(&self, player: PlayerId) -> usize {
        self.garrisons.iter().filter(|g| g.owner == player).count()
    }

    /// Units across every territory owned by a player.
    #[must_use]
    pub fn total_units(&self, player: PlayerId) -> u64 {
        self.garrisons
            .iter()
            .filter(|g| g.owner == player)
            .map(|g| u64::from(g.units))
            .sum()
    }

    /// Units on the whole board.
    #[must_use]
    pub fn board_units(&self) -> u64 {
        self.garrisons.iter().map(|g| u64::from(g.units)).sum()
    }

    /// Player whose turn it is.
    #[must_use]
    pub const fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Player who opened the first round.
    #[must_use]
    pub const fn start_player(&self) -> PlayerId {
        self.start
    }

    /// Completed rounds.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// The recorded winner, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Check whether the game has ended.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// Ordered `(name, owner, units)` rows for renderers and adapters.
    #[must_use]
    pub fn board_state(&self, board: &Board) -> Vec<TerritorySnapshot> {
        board
            .territories()
            .iter()
            .zip(&self.garrisons)
            .map(|(territory, garrison)| TerritorySnapshot {
                name: territory.name.clone(),
                owner: garrison.owner,
                units: garrison.units,
            })
            .collect()
    }

    /// Record a winner if exactly one owner remains on the board.
    ///
    /// Returns the winner, if any.
    pub fn check_winner(&mut self) -> Option<PlayerId> {
        if self.winner.is_some() {
            return self.winner;
        }
        let first = self.garrisons.first()?.owner;
        if self.garrisons.iter().all(|g| g.owner == first) {
            self.winner = Some(first);
        }
        self.winner
    }

    /// Mark every player without territory as eliminated.
    ///
    /// Returns the players eliminated by this call.
    pub fn check_elimination(&mut self) -> Vec<PlayerId> {
        let mut eliminated = Vec::new();
        for player in &mut self.players {
            if player.alive && !self.garrisons.iter().any(|g| g.owner == player.id) {
                player.eliminate();
                eliminated.push(player.id);
            }
        }
        eliminated
    }

    /// Mutable access to a garrison for the rule operations.
    pub(crate) fn garrison_mut(&mut self, territory: TerritoryId) -> &mut Garrison {
        &mut self.garrisons[territory]
    }

    /// Hand the turn to another player.
    pub(crate) fn set_current(&mut self, player: PlayerId) {
        self.current = player;
    }

    /// Count one more completed round.
    pub(crate) fn advance_turn(&mut self) {
        self.turn += 1;
    }
}

/// Reject player counts the board cannot seat.
fn validate_player_count(board: &Board, num_players: usize) -> Result<(), SetupError> {
    if num_players < 2 {
        return Err(SetupError::TooFewPlayers(num_players));
    }
    let limit = MAX_PLAYERS.min(board.len());
    if num_players > limit {
        return Err(SetupError::TooManyPlayers {
            players: num_players,
            limit,
        });
    }
    Ok(())
}

/// Convert a seat index below [`MAX_PLAYERS`] into a player id.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn player_id(seat: usize) -> PlayerId {
    seat as PlayerId
}

/// Fisher-Yates shuffle drawing from the game's die source.
#[allow(clippy::cast_possible_truncation)]
fn shuffle<D: DieSource + ?Sized>(items: &mut [TerritoryId], dice: &mut D) {
    for i in (1..items.len()).rev() {
        let j = dice.roll(0, i as u32) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ScriptedDice, line_board};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn position(owners: &[PlayerId], units: &[u32]) -> Vec<Garrison> {
        owners
            .iter()
            .zip(units)
            .map(|(&owner, &units)| Garrison::new(owner, units))
            .collect()
    }

    #[test]
    fn test_initialize_deals_evenly() {
        let board = Board::classic().unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let state = GameState::initialize(&board, 4, &mut rng).unwrap();

        assert!(state.garrisons().iter().all(|g| g.units == 1));
        let counts: Vec<usize> = (0..4).map(|p| state.territory_count(p)).collect();
        assert_eq!(counts, vec![11, 11, 10, 10]);
        assert_eq!(counts.iter().sum::<usize>(), board.len());

        // 42 territories dealt to 4 players: the last card goes to player 1
        assert_eq!(state.start_player(), 2);
        assert_eq!(state.current_player(), 2);
        assert_eq!(state.turn(), 0);
        assert_eq!(state.winner(), None);
        assert_eq!(state.alive_players().count(), 4);
    }

    #[test]
    fn test_initialize_reproducible() {
        let board = Board::classic().unwrap();
        let a = GameState::initialize(&board, 3, &mut SmallRng::seed_from_u64(5)).unwrap();
        let b = GameState::initialize(&board, 3, &mut SmallRng::seed_from_u64(5)).unwrap();
        let c = GameState::initialize(&board, 3, &mut SmallRng::seed_from_u64(6)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.garrisons(), c.garrisons());
    }

    #[test]
    fn test_initialize_player_limits() {
        let board = line_board();
        let mut dice = ScriptedDice::new(vec![0]);
        assert_eq!(
            GameState::initialize(&board, 1, &mut dice),
            Err(SetupError::TooFewPlayers(1))
        );
        assert_eq!(
            GameState::initialize(&board, 7, &mut dice),
            Err(SetupError::TooManyPlayers {
                players: 7,
                limit: 6
            })
        );
        assert!(GameState::initialize(&board, 6, &mut dice).is_ok());
    }

    #[test]
    fn test_from_garrisons_validation() {
        let board = line_board();
        let err = GameState::from_garrisons(&board, position(&[0, 1], &[1, 1]), 2, 0);
        assert_eq!(
            err,
            Err(SetupError::GarrisonCountMismatch {
                expected: 6,
                actual: 2
            })
        );

        let err = GameState::from_garrisons(
            &board,
            position(&[0, 0, 0, 1, 1, 2], &[1; 6]),
            2,
            0,
        );
        assert_eq!(
            err,
            Err(SetupError::UnknownOwner {
                territory: 5,
                owner: 2
            })
        );

        let err = GameState::from_garrisons(
            &board,
            position(&[0, 0, 0, 1, 1, 1], &[1, 1, 0, 1, 1, 1]),
            2,
            0,
        );
        assert_eq!(err, Err(SetupError::EmptyGarrison { territory: 2 }));

        let err = GameState::from_garrisons(&board, position(&[0; 6], &[1; 6]), 2, 4);
        assert_eq!(err, Err(SetupError::UnknownPlayer(4)));
    }

    #[test]
    fn test_from_garrisons_rejects_landless_opener() {
        let board = line_board();
        let err =
            GameState::from_garrisons(&board, position(&[0, 0, 0, 2, 2, 2], &[1; 6]), 3, 1);
        assert_eq!(err, Err(SetupError::DeadPlayer(1)));

        let err = GameState::from_garrisons(&board, position(&[1; 6], &[1; 6]), 2, 0);
        assert_eq!(err, Err(SetupError::DeadPlayer(0)));
    }

    #[test]
    fn test_from_garrisons_derives_liveness() {
        let board = line_board();
        let state =
            GameState::from_garrisons(&board, position(&[0, 0, 0, 2, 2, 2], &[1; 6]), 3, 2).unwrap();
        assert!(state.is_alive(0));
        assert!(!state.is_alive(1));
        assert!(state.is_alive(2));
        assert!(!state.is_alive(9));
        assert_eq!(state.current_player(), 2);
        assert_eq!(state.start_player(), 2);
    }

    #[test]
    fn test_queries() {
        let board = line_board();
        let state = GameState::from_garrisons(
            &board,
            position(&[0, 0, 1, 1, 0, 1], &[3, 1, 4, 1, 5, 9]),
            2,
            0,
        )
        .unwrap();
        assert_eq!(state.owned_by(0).collect::<Vec<_>>(), vec![0, 1, 4]);
        assert_eq!(state.total_units(0), 9);
        assert_eq!(state.total_units(1), 14);
        assert_eq!(state.board_units(), 23);
        assert_eq!(state.garrison(2), Garrison::new(1, 4));

        let rows = state.board_state(&board);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5].name, "F");
        assert_eq!(rows[5].owner, 1);
        assert_eq!(rows[5].units, 9);
    }

    #[test]
    fn test_check_winner() {
        let board = line_board();
        let mut state =
            GameState::from_garrisons(&board, position(&[0, 0, 0, 1, 0, 0], &[1; 6]), 2, 0).unwrap();
        assert_eq!(state.check_winner(), None);
        assert!(!state.is_terminal());

        state.garrison_mut(3).owner = 0;
        assert_eq!(state.check_winner(), Some(0));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_check_elimination() {
        let board = line_board();
        let mut state =
            GameState::from_garrisons(&board, position(&[0, 0, 1, 2, 2, 2], &[1; 6]), 3, 0).unwrap();
        assert!(state.check_elimination().is_empty());

        state.garrison_mut(2).owner = 0;
        assert_eq!(state.check_elimination(), vec![1]);
        assert!(!state.is_alive(1));
        // Already eliminated players are not reported twice
        assert!(state.check_elimination().is_empty());
        assert_eq!(state.alive_players().collect::<Vec<_>>(), vec![0, 2]);
    }
}
