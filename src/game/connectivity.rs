//! Reachability through a player's own territory.
//!
//! A path may only pass through territories owned by the player. The
//! destination itself may have any owner, so the relation is symmetric
//! whenever both ends are owned.

use std::collections::VecDeque;

use crate::game::{Board, GameState, PlayerId, TerritoryId};

/// Check whether `to` can be reached from `from` through `player`'s territory.
///
/// The search exhausts the whole frontier before answering `false`.
/// A territory is always linked to itself.
///
/// # Panics
///
/// Panics if either territory is outside the board.
#[must_use]
pub fn is_link(
    board: &Board,
    state: &GameState,
    player: PlayerId,
    from: TerritoryId,
    to: TerritoryId,
) -> bool {
    board.check(from);
    board.check(to);
    if from == to {
        return true;
    }

    let mut visited = vec![false; board.len()];
    let mut queue = VecDeque::from([from]);
    visited[from] = true;

    while let Some(current) = queue.pop_front() {
        for &next in board.neighbors(current) {
            if next == to {
                return true;
            }
            if !visited[next] && state.owner(next) == player {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

/// Connected components of the subgraph owned by `player`.
///
/// Returns one component label per territory; territories the player does
/// not own are `None`. Labels count up from 0 in territory order.
#[must_use]
pub fn components(board: &Board, state: &GameState, player: PlayerId) -> Vec<Option<usize>> {
    let mut labels = vec![None; board.len()];
    let mut next_label = 0;

    for root in state.owned_by(player) {
        if labels[root].is_some() {
            continue;
        }
        labels[root] = Some(next_label);
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            for &next in board.neighbors(current) {
                if labels[next].is_none() && state.owner(next) == player {
                    labels[next] = Some(next_label);
                    queue.push_back(next);
                }
            }
        }
        next_label += 1;
    }
    labels
}

/// Advisory fortify capacities for one player.
///
/// Entry `(i, j)` holds `units(i) - 1` when `i != j` are both owned by the
/// player and connected through their territory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortifyPaths {
    size: usize,
    capacity: Vec<Option<u32>>,
}

impl FortifyPaths {
    /// Most units that may move from `from` to `to`, or `None` without a path.
    ///
    /// # Panics
    ///
    /// Panics if either territory is outside the board.
    #[must_use]
    pub fn get(&self, from: TerritoryId, to: TerritoryId) -> Option<u32> {
        assert!(
            from < self.size && to < self.size,
            "territory index out of range: ({from}, {to}) on a board of {}",
            self.size
        );
        self.capacity[from * self.size + to]
    }

    /// Every connected ordered pair with its capacity, including zero
    /// capacities.
    pub fn pairs(&self) -> impl Iterator<Item = (TerritoryId, TerritoryId, u32)> + '_ {
        self.capacity
            .iter()
            .enumerate()
            .filter_map(move |(index, cap)| cap.map(|c| (index / self.size, index % self.size, c)))
    }

    /// Pairs with at least one movable unit.
    pub fn usable(&self) -> impl Iterator<Item = (TerritoryId, TerritoryId, u32)> + '_ {
        self.pairs().filter(|&(_, _, capacity)| capacity > 0)
    }

    /// Dense matrix form, zero where no path exists.
    #[must_use]
    pub fn to_matrix(&self) -> Vec<Vec<u32>> {
        self.capacity
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|c| c.unwrap_or(0)).collect())
            .collect()
    }
}

/// Compute the fortify capacity map for a player.
///
/// Entry `(from, to)` holds `units(from) - 1` when both are owned and linked.
/// The diagonal is always `None`: a territory is not a fortify destination
/// for itself, even though [`is_link`] treats `from == to` as linked.
#[must_use]
pub fn get_fortify_paths(board: &Board, state: &GameState, player: PlayerId) -> FortifyPaths {
    let size = board.len();
    let labels = components(board, state, player);
    let mut capacity = vec![None; size * size];

    for (from, label) in labels.iter().enumerate() {
        let Some(label) = label else {
            continue;
        };
        let available = state.units(from) - 1;
        for (to, other) in labels.iter().enumerate() {
            if to != from && *other == Some(*label) {
                capacity[from * size + to] = Some(available);
            }
        }
    }
    FortifyPaths { size, capacity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Garrison, line_board};

    fn state(owners: [PlayerId; 6], units: [u32; 6]) -> GameState {
        let garrisons = owners
            .iter()
            .zip(units)
            .map(|(&owner, units)| Garrison::new(owner, units))
            .collect();
        GameState::from_garrisons(&line_board(), garrisons, 2, 0).unwrap()
    }

    #[test]
    fn test_multi_hop_link() {
        let board = line_board();
        let state = state([0, 0, 0, 0, 1, 1], [1; 6]);
        // A to D crosses B and C
        assert!(is_link(&board, &state, 0, 0, 3));
        assert!(is_link(&board, &state, 0, 3, 0));
    }

    #[test]
    fn test_link_blocked_by_enemy() {
        let board = line_board();
        let state = state([0, 1, 0, 0, 1, 0], [1; 6]);
        assert!(!is_link(&board, &state, 0, 0, 2));
        assert!(!is_link(&board, &state, 0, 2, 0));
        assert!(is_link(&board, &state, 0, 2, 3));
        assert!(!is_link(&board, &state, 0, 3, 5));
    }

    #[test]
    fn test_link_into_foreign_destination() {
        let board = line_board();
        let state = state([0, 0, 1, 1, 1, 1], [1; 6]);
        // The destination itself may be foreign
        assert!(is_link(&board, &state, 0, 0, 2));
        assert!(!is_link(&board, &state, 0, 0, 3));
    }

    #[test]
    fn test_link_to_self() {
        let board = line_board();
        let state = state([0, 1, 0, 1, 0, 1], [1; 6]);
        assert!(is_link(&board, &state, 0, 4, 4));
    }

    #[test]
    fn test_link_symmetric_on_owned_pairs() {
        let board = line_board();
        let state = state([0, 0, 1, 0, 0, 1], [1; 6]);
        for a in state.owned_by(0) {
            for b in state.owned_by(0) {
                assert_eq!(
                    is_link(&board, &state, 0, a, b),
                    is_link(&board, &state, 0, b, a)
                );
            }
        }
    }

    #[test]
    fn test_components() {
        let board = line_board();
        let state = state([0, 0, 1, 0, 0, 1], [1; 6]);
        assert_eq!(
            components(&board, &state, 0),
            vec![Some(0), Some(0), None, Some(1), Some(1), None]
        );
        assert_eq!(
            components(&board, &state, 1),
            vec![None, None, Some(0), None, None, Some(1)]
        );
    }

    #[test]
    fn test_fortify_paths() {
        let board = line_board();
        let state = state([0, 0, 1, 0, 0, 1], [4, 1, 2, 7, 3, 1]);
        let paths = get_fortify_paths(&board, &state, 0);

        assert_eq!(paths.get(0, 1), Some(3));
        assert_eq!(paths.get(1, 0), Some(0));
        assert_eq!(paths.get(3, 4), Some(6));
        assert_eq!(paths.get(4, 3), Some(2));
        assert_eq!(paths.get(0, 0), None);
        assert_eq!(paths.get(0, 3), None);
        assert_eq!(paths.get(0, 2), None);

        assert_eq!(paths.pairs().count(), 4);
        assert_eq!(
            paths.usable().collect::<Vec<_>>(),
            vec![(0, 1, 3), (3, 4, 6), (4, 3, 2)]
        );

        let matrix = paths.to_matrix();
        assert_eq!(matrix.len(), 6);
        assert_eq!(matrix[3], vec![0, 0, 0, 0, 6, 0]);
    }

    #[test]
    fn test_fortify_paths_agree_with_is_link() {
        let board = line_board();
        let state = state([1, 0, 0, 1, 0, 0], [2; 6]);
        let paths = get_fortify_paths(&board, &state, 0);
        for a in state.owned_by(0) {
            for b in state.owned_by(0) {
                let linked = a != b && is_link(&board, &state, 0, a, b);
                assert_eq!(paths.get(a, b).is_some(), linked, "pair ({a}, {b})");
            }
        }
    }

    #[test]
    fn test_fortify_paths_skip_diagonal() {
        let board = line_board();
        let state = state([0, 0, 0, 0, 0, 0], [5; 6]);
        let paths = get_fortify_paths(&board, &state, 0);
        let matrix = paths.to_matrix();
        for territory in 0..board.len() {
            assert!(is_link(&board, &state, 0, territory, territory));
            assert_eq!(paths.get(territory, territory), None);
            assert_eq!(matrix[territory][territory], 0);
        }
        assert_eq!(paths.pairs().count(), 30);
    }
}
