#![no_main]

//! Full game turn fuzzer.
//!
//! This fuzz target feeds arbitrary action records to the turn controller:
//! 1. Deal a seeded game on the classic map
//! 2. Apply actions on behalf of arbitrary players
//! 3. Check the integrity invariants after every step
//!
//! This catches phase and hand-over bugs the single-operation fuzzers miss.

use std::sync::Arc;

use arbitrary::Arbitrary;
use conquest::game::invariants::check_invariants;
use conquest::game::{Action, AttackOrder, FortifyOrder, Placement, ReinforceOrder, ScriptedDice};
use conquest::{Board, Game};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated action.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzAction {
    Reinforce { placements: Vec<(u8, u8)> },
    Attack { from: u8, to: u8, committed: u8 },
    Fortify { from: u8, to: u8, units: u8 },
    EndPhase,
    EndTurn,
}

impl FuzzAction {
    fn to_action(&self, territories: usize) -> Action {
        let id = |raw: u8| usize::from(raw) % territories;
        match self {
            Self::Reinforce { placements } => Action::Reinforce(ReinforceOrder {
                placements: placements
                    .iter()
                    .map(|&(t, units)| Placement::new(id(t), u32::from(units)))
                    .collect(),
            }),
            Self::Attack { from, to, committed } => Action::Attack(AttackOrder {
                from: id(*from),
                to: id(*to),
                committed: u32::from(*committed),
            }),
            Self::Fortify { from, to, units } => Action::Fortify(FortifyOrder {
                from: id(*from),
                to: id(*to),
                units: u32::from(*units),
            }),
            Self::EndPhase => Action::EndPhase,
            Self::EndTurn => Action::EndTurn,
        }
    }
}

/// Structured input for full game turn fuzzing.
#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    /// Number of seated players.
    players: u8,
    /// Dice faces for the shuffle and every exchange.
    faces: Vec<u8>,
    /// Actions with the seat that submits them.
    actions: Vec<(u8, FuzzAction)>,
}

fuzz_target!(|input: GameTurnInput| {
    let Ok(board) = Board::classic() else {
        return;
    };
    let board = Arc::new(board);
    let players = usize::from(input.players % 7) + 2;
    let dice = ScriptedDice::new(input.faces.iter().map(|&f| u32::from(f)).collect());
    let Ok(mut game) = Game::new(Arc::clone(&board), players, dice) else {
        return;
    };

    for (seat, action) in input.actions.iter().take(200) {
        let player = seat % players as u8;
        let before = game.state().clone();
        let phase = game.phase();

        if game.apply(player, &action.to_action(board.len())).is_err() {
            assert_eq!(game.state(), &before, "rejected action changed the state");
            assert_eq!(game.phase(), phase, "rejected action changed the phase");
        }

        let violations = check_invariants(&board, game.state());
        assert!(violations.is_empty(), "invariants violated: {violations:?}");
        assert_eq!(game.is_over(), game.winner().is_some());
        if !game.is_over() {
            assert!(game.is_alive(game.current_player()));
        }
    }
});
