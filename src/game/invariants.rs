//! Game invariants - integrity checks that detect engine bugs.
//!
//! Rule operations must leave every one of these intact. A violation means
//! the engine itself is broken, not that a player did something illegal.

use crate::game::{Board, GameState};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(board: &Board, state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if state.garrisons().len() != board.len() {
        violations.push(violation(format!(
            "{} garrisons on a board of {} territories",
            state.garrisons().len(),
            board.len()
        )));
    }

    for (territory, garrison) in state.garrisons().iter().enumerate() {
        if garrison.units == 0 {
            violations.push(violation(format!("Territory {territory} has no units")));
        }
        if usize::from(garrison.owner) >= state.num_players() {
            violations.push(violation(format!(
                "Territory {territory} owned by unknown player {}",
                garrison.owner
            )));
        }
    }

    // Liveness must match ownership
    for player in state.players() {
        let territories = state.territory_count(player.id);
        if !player.alive && territories > 0 {
            violations.push(violation(format!(
                "Dead player {} still owns {territories} territories",
                player.id
            )));
        }
        if player.alive && territories == 0 {
            violations.push(violation(format!(
                "Alive player {} owns no territory",
                player.id
            )));
        }
    }

    if let Some(winner) = state.winner() {
        if let Some(other) = state.garrisons().iter().find(|g| g.owner != winner) {
            violations.push(violation(format!(
                "Winner {winner} recorded while player {} still owns territory",
                other.owner
            )));
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(board: &Board, state: &GameState) {
    let violations = check_invariants(board, state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_board: &Board, _state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Garrison, PlayerId, line_board};

    fn create_valid_game(owners: [PlayerId; 6]) -> GameState {
        let garrisons = owners.iter().map(|&owner| Garrison::new(owner, 2)).collect();
        GameState::from_garrisons(&line_board(), garrisons, 3, 0).unwrap()
    }

    #[test]
    fn test_valid_game_passes() {
        let game = create_valid_game([0, 0, 1, 1, 2, 2]);
        assert!(check_invariants(&line_board(), &game).is_empty());
    }

    #[test]
    fn test_dead_player_without_territory_passes() {
        let game = create_valid_game([0, 0, 0, 2, 2, 2]);
        assert!(!game.is_alive(1));
        assert!(check_invariants(&line_board(), &game).is_empty());
    }

    #[test]
    fn test_empty_territory_detected() {
        let mut game = create_valid_game([0, 0, 1, 1, 2, 2]);
        game.garrison_mut(3).units = 0;

        let violations = check_invariants(&line_board(), &game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("no units"));
        assert_eq!(
            violations[0].to_string(),
            format!("Invariant violation: {}", violations[0].message)
        );
        let error: &dyn std::error::Error = &violations[0];
        assert!(error.source().is_none());
    }

    #[test]
    fn test_unknown_owner_detected() {
        let mut game = create_valid_game([0, 0, 1, 1, 2, 2]);
        game.garrison_mut(0).owner = 7;

        let violations = check_invariants(&line_board(), &game);
        assert!(violations.iter().any(|v| v.message.contains("unknown player 7")));
    }

    #[test]
    fn test_dead_player_with_territory_detected() {
        let mut game = create_valid_game([0, 0, 0, 2, 2, 2]);
        // Player 1 is dead but regains a territory without being revived
        game.garrison_mut(0).owner = 1;

        let violations = check_invariants(&line_board(), &game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Dead player 1"));
    }

    #[test]
    fn test_alive_player_without_territory_detected() {
        let mut game = create_valid_game([0, 0, 1, 1, 2, 2]);
        game.garrison_mut(2).owner = 0;
        game.garrison_mut(3).owner = 0;

        let violations = check_invariants(&line_board(), &game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Alive player 1"));

        game.check_elimination();
        assert!(check_invariants(&line_board(), &game).is_empty());
    }

    #[test]
    fn test_stale_winner_detected() {
        let mut game = create_valid_game([0, 0, 0, 2, 2, 2]);
        for territory in 3..6 {
            game.garrison_mut(territory).owner = 0;
        }
        game.check_elimination();
        assert_eq!(game.check_winner(), Some(0));
        assert!(check_invariants(&line_board(), &game).is_empty());

        game.garrison_mut(5).owner = 2;
        let violations = check_invariants(&line_board(), &game);
        assert!(violations.iter().any(|v| v.message.contains("Winner 0")));
    }

    #[test]
    fn test_multiple_violations_all_reported() {
        let mut game = create_valid_game([0, 0, 1, 1, 2, 2]);
        game.garrison_mut(0).units = 0;
        game.garrison_mut(1).units = 0;

        let violations = check_invariants(&line_board(), &game);
        assert_eq!(violations.len(), 2, "{violations:?}");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Game invariant violations")]
    fn test_assert_invariants_panics() {
        let mut game = create_valid_game([0, 0, 1, 1, 2, 2]);
        game.garrison_mut(4).units = 0;
        assert_invariants(&line_board(), &game);
    }
}
