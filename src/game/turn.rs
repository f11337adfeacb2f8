//! Turn controller.
//!
//! [`Game`] owns the board, the state and the die source, and enforces the
//! phase sequence `Reinforce -> Attack -> Fortify -> next player`.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use super::state::player_id;
use crate::error::{RuleViolation, SetupError};
use crate::game::invariants::assert_invariants;
use crate::game::{
    Action, AttackReport, Board, DieSource, FortifyPaths, GameState, Placement, PlayerId,
    TerritoryId, TerritorySnapshot,
};

/// Phase of the current player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Placing reinforcements.
    Reinforce,
    /// Declaring attacks.
    Attack,
    /// Moving units between connected territories.
    Fortify,
    /// One player owns the board.
    Finished,
}

/// Result of [`Game::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Units placed.
    Reinforced(u32),
    /// One dice exchange.
    Attacked(AttackReport),
    /// Units moved.
    Fortified(u32),
    /// The phase now in effect.
    PhaseEnded(Phase),
    /// The player whose turn it now is.
    TurnEnded(PlayerId),
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game<D = SmallRng> {
    board: Arc<Board>,
    state: GameState,
    dice: D,
    phase: Phase,
    fortified: bool,
}

impl Game<SmallRng> {
    /// Start a game whose shuffle and dice derive from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot seat `num_players`.
    pub fn seeded(
        board: impl Into<Arc<Board>>,
        num_players: usize,
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::new(board, num_players, SmallRng::seed_from_u64(seed))
    }
}

impl<D: DieSource> Game<D> {
    /// Deal a fresh game.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot seat `num_players`.
    pub fn new(
        board: impl Into<Arc<Board>>,
        num_players: usize,
        mut dice: D,
    ) -> Result<Self, SetupError> {
        let board = board.into();
        let state = GameState::initialize(&board, num_players, &mut dice)?;
        Ok(Self {
            board,
            state,
            dice,
            phase: Phase::Reinforce,
            fortified: false,
        })
    }

    /// Resume from an explicit state at the start of its current player's turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the state does not cover the board, or if an
    /// unfinished position hands the turn to a player with no territory.
    pub fn from_state(
        board: impl Into<Arc<Board>>,
        mut state: GameState,
        dice: D,
    ) -> Result<Self, SetupError> {
        let board = board.into();
        if state.garrisons().len() != board.len() {
            return Err(SetupError::GarrisonCountMismatch {
                expected: board.len(),
                actual: state.garrisons().len(),
            });
        }
        let phase = if state.check_winner().is_some() {
            Phase::Finished
        } else if state.territory_count(state.current_player()) == 0 {
            return Err(SetupError::DeadPlayer(state.current_player()));
        } else {
            Phase::Reinforce
        };
        Ok(Self {
            board,
            state,
            dice,
            phase,
            fortified: false,
        })
    }

    /// Deal the board again with the same players and die source.
    ///
    /// Returns the player who opens the new game.
    pub fn reset(&mut self) -> PlayerId {
        self.state = GameState::deal(&self.board, self.state.num_players(), &mut self.dice);
        self.phase = Phase::Reinforce;
        self.fortified = false;
        log::debug!("game reset, player {} opens", self.state.current_player());
        self.state.current_player()
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Shared handle to the board.
    #[must_use]
    pub fn board_arc(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Phase of the current turn.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Player whose turn it is.
    #[must_use]
    pub const fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    /// Completed rounds.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.state.turn()
    }

    /// The winner, once there is one.
    #[must_use]
    pub const fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    /// Check whether the game has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Check whether a player is still in the game.
    #[must_use]
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.state.is_alive(player)
    }

    /// Ordered `(name, owner, units)` rows.
    #[must_use]
    pub fn board_state(&self) -> Vec<TerritorySnapshot> {
        self.state.board_state(&self.board)
    }

    /// Reinforcements `player` would receive now.
    #[must_use]
    pub fn get_reinforcements(&self, player: PlayerId) -> u32 {
        super::get_reinforcements(&self.board, &self.state, player)
    }

    /// Advisory fortify capacities for `player`.
    #[must_use]
    pub fn get_fortify_paths(&self, player: PlayerId) -> FortifyPaths {
        super::get_fortify_paths(&self.board, &self.state, player)
    }

    /// Check whether `to` is reachable from `from` through `player`'s territory.
    ///
    /// # Panics
    ///
    /// Panics if either territory is outside the board.
    #[must_use]
    pub fn is_link(&self, player: PlayerId, from: TerritoryId, to: TerritoryId) -> bool {
        super::is_link(&self.board, &self.state, player, from, to)
    }

    /// Place this turn's reinforcements and move on to the attack phase.
    ///
    /// # Errors
    ///
    /// Fails if it is not `player`'s reinforce phase or the placements break
    /// the reinforcement rules.
    pub fn reinforce(
        &mut self,
        player: PlayerId,
        placements: &[Placement],
    ) -> Result<u32, RuleViolation> {
        self.ensure(player, Phase::Reinforce)?;
        let placed = super::reinforce(&self.board, &mut self.state, player, placements)?;
        self.phase = Phase::Attack;
        assert_invariants(&self.board, &self.state);
        Ok(placed)
    }

    /// Resolve one dice exchange.
    ///
    /// # Errors
    ///
    /// Fails if it is not `player`'s attack phase or the declaration is
    /// illegal.
    pub fn attack(
        &mut self,
        player: PlayerId,
        from: TerritoryId,
        to: TerritoryId,
        committed: u32,
    ) -> Result<AttackReport, RuleViolation> {
        self.ensure(player, Phase::Attack)?;
        let report = super::attack(
            &self.board,
            &mut self.state,
            &mut self.dice,
            player,
            from,
            to,
            committed,
        )?;
        if report.victory() {
            self.phase = Phase::Finished;
        }
        assert_invariants(&self.board, &self.state);
        Ok(report)
    }

    /// Make this turn's single fortification.
    ///
    /// A move from a territory onto itself changes nothing and leaves the
    /// fortification unused.
    ///
    /// # Errors
    ///
    /// Fails if it is not `player`'s fortify phase, a fortification was
    /// already made, or the move is illegal.
    pub fn fortify(
        &mut self,
        player: PlayerId,
        from: TerritoryId,
        to: TerritoryId,
        units: u32,
    ) -> Result<u32, RuleViolation> {
        self.ensure(player, Phase::Fortify)?;
        if self.fortified {
            return Err(RuleViolation::AlreadyFortified);
        }
        let moved = super::fortify(&self.board, &mut self.state, player, from, to, units)?;
        if from != to {
            self.fortified = true;
        }
        assert_invariants(&self.board, &self.state);
        Ok(moved)
    }

    /// Finish the current phase.
    ///
    /// Ending the fortify phase hands the turn over. Returns the phase now in
    /// effect.
    ///
    /// # Errors
    ///
    /// Fails if the game is over or it is not `player`'s turn.
    pub fn end_phase(&mut self, player: PlayerId) -> Result<Phase, RuleViolation> {
        self.ensure_turn(player)?;
        self.phase = match self.phase {
            Phase::Reinforce => Phase::Attack,
            Phase::Attack => Phase::Fortify,
            Phase::Fortify | Phase::Finished => {
                self.hand_over();
                Phase::Reinforce
            }
        };
        Ok(self.phase)
    }

    /// Hand the turn to the next living player, skipping remaining phases.
    ///
    /// # Errors
    ///
    /// Fails if the game is over or it is not `player`'s turn.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<PlayerId, RuleViolation> {
        self.ensure_turn(player)?;
        self.phase = Phase::Reinforce;
        Ok(self.hand_over())
    }

    /// Dispatch an action record.
    ///
    /// # Errors
    ///
    /// Returns the rule violation of the underlying operation.
    pub fn apply(
        &mut self,
        player: PlayerId,
        action: &Action,
    ) -> Result<ActionOutcome, RuleViolation> {
        match action {
            Action::Reinforce(order) => self
                .reinforce(player, &order.placements)
                .map(ActionOutcome::Reinforced),
            Action::Attack(order) => self
                .attack(player, order.from, order.to, order.committed)
                .map(ActionOutcome::Attacked),
            Action::Fortify(order) => self
                .fortify(player, order.from, order.to, order.units)
                .map(ActionOutcome::Fortified),
            Action::EndPhase => self.end_phase(player).map(ActionOutcome::PhaseEnded),
            Action::EndTurn => self.end_turn(player).map(ActionOutcome::TurnEnded),
        }
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), RuleViolation> {
        if self.phase == Phase::Finished {
            return Err(RuleViolation::GameOver);
        }
        let current = self.state.current_player();
        if player != current {
            return Err(RuleViolation::NotYourTurn { player, current });
        }
        Ok(())
    }

    fn ensure(&self, player: PlayerId, expected: Phase) -> Result<(), RuleViolation> {
        self.ensure_turn(player)?;
        if self.phase != expected {
            return Err(RuleViolation::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Rotate to the next living player, counting rounds as the rotation
    /// passes the start seat.
    fn hand_over(&mut self) -> PlayerId {
        let seats = self.state.num_players();
        let mut seat = usize::from(self.state.current_player());
        for _ in 0..seats {
            seat = (seat + 1) % seats;
            if player_id(seat) == self.state.start_player() {
                self.state.advance_turn();
            }
            if self.state.is_alive(player_id(seat)) {
                break;
            }
        }
        let next = player_id(seat);
        self.state.set_current(next);
        self.fortified = false;
        log::debug!("round {}: player {next} to move", self.state.turn());
        next
    }
}
