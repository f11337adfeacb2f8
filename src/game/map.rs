//! Board graph: territories, borders and continents.
//!
//! Territories are indexed in continent-major order, so every continent
//! covers a contiguous index range. "Does a player hold all of continent C"
//! is then a single slice scan over the garrisons.

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use crate::error::{BoardError, RuleViolation};
use crate::game::BoardDescription;

/// Stable index of a territory, `0..board.len()`.
pub type TerritoryId = usize;

/// Index of a continent in [`Board::continents`].
pub type ContinentId = usize;

/// The classic six-continent world map.
const CLASSIC_MAP: &str = include_str!("../../maps/classic.json");

/// A single territory of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Territory {
    /// Human-readable name, unique on the board.
    pub name: String,
    /// Continent this territory belongs to.
    pub continent: ContinentId,
    /// Bordering territories in ascending index order.
    pub neighbors: Vec<TerritoryId>,
    /// Display position, if the document provided one.
    pub position: Option<[f64; 2]>,
}

/// A continent: a contiguous block of territories worth a bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continent {
    /// Continent name.
    pub name: String,
    /// Member territories.
    pub territories: Range<TerritoryId>,
    /// Reinforcement bonus for holding every member.
    pub bonus: u32,
}

impl Continent {
    /// Check whether a territory belongs to this continent.
    #[must_use]
    pub fn contains(&self, territory: TerritoryId) -> bool {
        self.territories.contains(&territory)
    }

    /// Number of member territories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    /// Check whether the continent has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }
}

/// The immutable board graph.
#[derive(Debug, Clone)]
pub struct Board {
    /// Territories in index order.
    territories: Vec<Territory>,
    /// Continents in index order.
    continents: Vec<Continent>,
    /// Row-major `len × len` adjacency matrix.
    adjacency: Vec<bool>,
    /// Name lookup table.
    index: HashMap<String, TerritoryId>,
}

impl Board {
    /// Build a board from a parsed description.
    ///
    /// Continents are laid out in document order, territories in the order
    /// their continent lists them. Borders are made symmetric.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, a territory sits in zero or
    /// several continents, a continent lists an undeclared territory, or a
    /// neighbor reference does not resolve.
    pub fn from_description(desc: &BoardDescription) -> Result<Self, BoardError> {
        if desc.territories.is_empty() {
            return Err(BoardError::Empty);
        }

        let mut index = HashMap::with_capacity(desc.territories.len());
        let mut membership: HashMap<&str, &str> = HashMap::with_capacity(desc.territories.len());
        let mut territories = Vec::with_capacity(desc.territories.len());
        let mut continents = Vec::with_capacity(desc.continents.len());

        for (continent_id, (continent_name, continent)) in desc.continents.iter().enumerate() {
            let start = territories.len();
            for name in &continent.territories {
                if let Some(first) = membership.insert(name.as_str(), continent_name.as_str()) {
                    return Err(BoardError::DuplicateMembership {
                        territory: name.clone(),
                        first: first.to_string(),
                        second: continent_name.clone(),
                    });
                }
                let Some(entry) = desc.territories.get(name) else {
                    return Err(BoardError::UndeclaredTerritory {
                        territory: name.clone(),
                        continent: continent_name.clone(),
                    });
                };
                index.insert(name.clone(), territories.len());
                territories.push(Territory {
                    name: name.clone(),
                    continent: continent_id,
                    neighbors: Vec::new(),
                    position: entry.position,
                });
            }
            continents.push(Continent {
                name: continent_name.clone(),
                territories: start..territories.len(),
                bonus: continent.bonus,
            });
        }

        if let Some(name) = desc.territories.keys().find(|name| !index.contains_key(*name)) {
            return Err(BoardError::Unassigned {
                territory: name.clone(),
            });
        }

        let count = territories.len();
        let mut adjacency = vec![false; count * count];
        for (name, entry) in &desc.territories {
            let from = index[name];
            for neighbor in &entry.neighbors {
                let Some(&to) = index.get(neighbor) else {
                    return Err(BoardError::UnknownNeighbor {
                        territory: name.clone(),
                        neighbor: neighbor.clone(),
                    });
                };
                if to == from {
                    return Err(BoardError::SelfAdjacent {
                        territory: name.clone(),
                    });
                }
                adjacency[from * count + to] = true;
                adjacency[to * count + from] = true;
            }
        }

        for (from, territory) in territories.iter_mut().enumerate() {
            territory.neighbors = (0..count)
                .filter(|&to| adjacency[from * count + to])
                .collect();
        }

        Ok(Self {
            territories,
            continents,
            adjacency,
            index,
        })
    }

    /// Parse and build a board from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid board document.
    pub fn from_json(text: &str) -> Result<Self, BoardError> {
        Self::from_description(&BoardDescription::from_json(text)?)
    }

    /// Read and build a board from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid board.
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        Self::from_description(&BoardDescription::load(path)?)
    }

    /// The classic 42-territory world map.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded document is corrupt.
    pub fn classic() -> Result<Self, BoardError> {
        Self::from_json(CLASSIC_MAP)
    }

    /// Number of territories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    /// Check whether the board has no territories. Never true for a built board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// All territories in index order.
    #[must_use]
    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    /// All continents in index order.
    #[must_use]
    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    /// Get a territory by index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn territory(&self, id: TerritoryId) -> &Territory {
        self.check(id);
        &self.territories[id]
    }

    /// Name of a territory.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn name(&self, id: TerritoryId) -> &str {
        &self.territory(id).name
    }

    /// Get a continent by index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn continent(&self, id: ContinentId) -> &Continent {
        &self.continents[id]
    }

    /// Continent a territory belongs to.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn continent_of(&self, id: TerritoryId) -> &Continent {
        &self.continents[self.territory(id).continent]
    }

    /// Bordering territories.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn neighbors(&self, id: TerritoryId) -> &[TerritoryId] {
        &self.territory(id).neighbors
    }

    /// Check whether two territories share a border.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn are_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.check(a);
        self.check(b);
        self.adjacency[a * self.len() + b]
    }

    /// Look a territory up by name.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::TerritoryNotFound`] for an unknown name.
    pub fn find(&self, name: &str) -> Result<TerritoryId, RuleViolation> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RuleViolation::TerritoryNotFound(name.to_string()))
    }

    /// Number of undirected borders.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.territories.iter().map(|t| t.neighbors.len()).sum::<usize>() / 2
    }

    /// Abort on an out-of-range territory index.
    ///
    /// Indices come from callers, so a bad one is a contract breach rather
    /// than a rule violation.
    pub(crate) fn check(&self, id: TerritoryId) {
        assert!(
            id < self.territories.len(),
            "territory index {id} out of range for a board of {} territories",
            self.territories.len()
        );
    }
}

/// Six territories in a line, `A - B - C | D - E - F`.
///
/// `East` (bonus 2) holds A, B, C at 0..3 and `West` (bonus 3) holds D, E, F
/// at 3..6.
#[cfg(test)]
const LINE_BOARD: &str = r#"{
    "Continents": {
        "East": { "territories": ["A", "B", "C"], "bonus": 2 },
        "West": { "territories": ["D", "E", "F"], "bonus": 3 }
    },
    "Territories": {
        "A": { "neighbors": ["B"] },
        "B": { "neighbors": ["A", "C"] },
        "C": { "neighbors": ["B", "D"] },
        "D": { "neighbors": ["C", "E"] },
        "E": { "neighbors": ["D", "F"] },
        "F": { "neighbors": ["E"] }
    }
}"#;

#[cfg(test)]
pub(crate) fn line_board() -> Board {
    Board::from_json(LINE_BOARD).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_board_layout() {
        let board = line_board();
        assert_eq!(board.len(), 6);
        assert_eq!(board.continents().len(), 2);
        assert_eq!(board.continents()[0].territories, 0..3);
        assert_eq!(board.continents()[1].territories, 3..6);
        assert_eq!(board.continents()[1].bonus, 3);
        assert_eq!(board.name(3), "D");
        assert_eq!(board.continent_of(4).name, "West");
        assert_eq!(board.continent(0).name, "East");
        assert_eq!(board.edge_count(), 5);
    }

    #[test]
    fn test_adjacency_symmetric() {
        let board = line_board();
        for a in 0..board.len() {
            for b in 0..board.len() {
                assert_eq!(board.are_adjacent(a, b), board.are_adjacent(b, a));
            }
        }
        assert!(board.are_adjacent(2, 3));
        assert!(!board.are_adjacent(0, 2));
        assert_eq!(board.neighbors(1), &[0, 2]);
    }

    #[test]
    fn test_one_sided_border_symmetrised() {
        let board = Board::from_json(
            r#"{
                "Continents": { "X": { "territories": ["P", "Q"], "bonus": 1 } },
                "Territories": {
                    "P": { "neighbors": ["Q"] },
                    "Q": { "neighbors": [] }
                }
            }"#,
        )
        .unwrap();
        assert!(board.are_adjacent(1, 0));
        assert_eq!(board.neighbors(1), &[0]);
    }

    #[test]
    fn test_find() {
        let board = line_board();
        assert_eq!(board.find("E"), Ok(4));
        assert_eq!(
            board.find("Z"),
            Err(RuleViolation::TerritoryNotFound("Z".to_string()))
        );
    }

    #[test]
    fn test_classic_map() {
        let board = Board::classic().unwrap();
        assert_eq!(board.len(), 42);
        assert_eq!(board.continents().len(), 6);
        assert_eq!(board.edge_count(), 83);

        let bonuses: u32 = board.continents().iter().map(|c| c.bonus).sum();
        assert_eq!(bonuses, 24);

        let asia = board.continent_of(board.find("China").unwrap());
        assert_eq!(asia.name, "Asia");
        assert_eq!(asia.len(), 12);
        assert_eq!(asia.bonus, 7);

        let alaska = board.find("Alaska").unwrap();
        let kamchatka = board.find("Kamchatka").unwrap();
        assert!(board.are_adjacent(alaska, kamchatka));
        assert!(board.territory(alaska).position.is_some());
    }

    #[test]
    fn test_classic_follows_document_order() {
        let board = Board::classic().unwrap();
        let names: Vec<&str> = board.continents().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "North America",
                "South America",
                "Europe",
                "Africa",
                "Asia",
                "Australia"
            ]
        );
        assert_eq!(board.name(0), "Alaska");
        assert_eq!(board.find("Alaska").unwrap(), 0);
    }

    #[test]
    fn test_continents_partition_board() {
        let board = Board::classic().unwrap();
        let mut next = 0;
        for continent in board.continents() {
            assert_eq!(continent.territories.start, next);
            next = continent.territories.end;
            for id in continent.territories.clone() {
                assert_eq!(board.continent_of(id), continent);
            }
        }
        assert_eq!(next, board.len());
    }

    #[test]
    fn test_empty_board_rejected() {
        let err = Board::from_json(r#"{ "Continents": {}, "Territories": {} }"#).unwrap_err();
        assert!(matches!(err, BoardError::Empty));
    }

    #[test]
    fn test_unknown_neighbor_rejected() {
        let err = Board::from_json(
            r#"{
                "Continents": { "X": { "territories": ["P"], "bonus": 1 } },
                "Territories": { "P": { "neighbors": ["Nowhere"] } }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::UnknownNeighbor { ref neighbor, .. } if neighbor == "Nowhere"));
    }

    #[test]
    fn test_unassigned_territory_rejected() {
        let err = Board::from_json(
            r#"{
                "Continents": { "X": { "territories": ["P"], "bonus": 1 } },
                "Territories": {
                    "P": { "neighbors": ["Q"] },
                    "Q": { "neighbors": ["P"] }
                }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::Unassigned { ref territory } if territory == "Q"));
    }

    #[test]
    fn test_duplicate_membership_rejected() {
        let err = Board::from_json(
            r#"{
                "Continents": {
                    "X": { "territories": ["P"], "bonus": 1 },
                    "Y": { "territories": ["P"], "bonus": 1 }
                },
                "Territories": { "P": { "neighbors": [] } }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::DuplicateMembership { .. }));
    }

    #[test]
    fn test_undeclared_territory_rejected() {
        let err = Board::from_json(
            r#"{
                "Continents": { "X": { "territories": ["P", "Ghost"], "bonus": 1 } },
                "Territories": { "P": { "neighbors": [] } }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::UndeclaredTerritory { ref territory, .. } if territory == "Ghost"));
    }

    #[test]
    fn test_self_adjacent_rejected() {
        let err = Board::from_json(
            r#"{
                "Continents": { "X": { "territories": ["P"], "bonus": 1 } },
                "Territories": { "P": { "neighbors": ["P"] } }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::SelfAdjacent { .. }));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_index_panics() {
        let board = line_board();
        let _ = board.territory(6);
    }
}
