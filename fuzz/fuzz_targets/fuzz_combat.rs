#![no_main]

//! Single-attack fuzzer.
//!
//! Builds an arbitrary position on the classic map, declares one attack with
//! scripted dice and checks conservation and the integrity invariants.

use arbitrary::Arbitrary;
use conquest::game::invariants::check_invariants;
use conquest::game::{Garrison, ScriptedDice, attack};
use conquest::{Board, GameState};
use libfuzzer_sys::fuzz_target;

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Owner and units per territory, cycled over the board.
    cells: Vec<(u8, u16)>,
    /// Number of seated players.
    players: u8,
    /// Declared source.
    from: u8,
    /// Declared target.
    to: u8,
    /// Declared commitment.
    committed: u32,
    /// Dice faces, clamped into 1..=6 by the source.
    faces: Vec<u8>,
}

fuzz_target!(|input: CombatInput| {
    if input.cells.is_empty() {
        return;
    }
    let Ok(board) = Board::classic() else {
        return;
    };
    let players = usize::from(input.players % 7) + 2;

    // Cap units to keep sums small
    let garrisons: Vec<Garrison> = (0..board.len())
        .map(|i| {
            let (owner, units) = input.cells[i % input.cells.len()];
            Garrison::new(owner % players as u8, u32::from(units % 1000) + 1)
        })
        .collect();
    let current = garrisons[0].owner;
    let Ok(mut state) = GameState::from_garrisons(&board, garrisons, players, current) else {
        return;
    };

    let violations = check_invariants(&board, &state);
    assert!(violations.is_empty(), "invalid start: {violations:?}");

    let from = usize::from(input.from) % board.len();
    let to = usize::from(input.to) % board.len();
    let attacker = state.owner(from);
    let before = state.clone();
    let mut dice = ScriptedDice::new(input.faces.iter().map(|&f| u32::from(f)).collect());

    match attack(&board, &mut state, &mut dice, attacker, from, to, input.committed) {
        Ok(report) => {
            let lost = report.exchange.attacker_losses + report.exchange.defender_losses;
            assert_eq!(state.board_units(), before.board_units() - u64::from(lost));
            assert!(report.exchange.attacker_dice.len() <= 3);
            assert!(report.exchange.defender_dice.len() <= 2);
            if report.captured {
                assert_eq!(state.owner(to), attacker);
                assert!(report.moved >= 1);
            } else {
                assert_eq!(state.owner(to), before.owner(to));
            }
        }
        Err(_) => assert_eq!(state, before, "rejected attack changed the state"),
    }

    let violations = check_invariants(&board, &state);
    assert!(violations.is_empty(), "invariants violated: {violations:?}");
});
