//! Board description documents.
//!
//! A board is authored as JSON with two sections:
//!
//! ```json
//! {
//!   "Continents": { "Oceania": { "territories": ["Java", "Bali"], "bonus": 2 } },
//!   "Territories": {
//!     "Java": { "neighbors": ["Bali"], "position": [0.1, 0.8] },
//!     "Bali": { "neighbors": ["Java"] }
//!   }
//! }
//! ```
//!
//! The description is consumed once by [`Board::from_description`](crate::game::Board::from_description).

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// A continent entry of the board document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentDescription {
    /// Member territory names.
    pub territories: Vec<String>,
    /// Reinforcement bonus for holding every member.
    pub bonus: u32,
}

/// A territory entry of the board document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryDescription {
    /// Names of bordering territories.
    pub neighbors: Vec<String>,
    /// Display position for renderers. Ignored by the rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
}

/// A complete board document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardDescription {
    /// Continents keyed by name, in document order.
    #[serde(rename = "Continents")]
    pub continents: IndexMap<String, ContinentDescription>,
    /// Territories keyed by name, in document order.
    #[serde(rename = "Territories")]
    pub territories: IndexMap<String, TerritoryDescription>,
}

impl BoardDescription {
    /// Parse a board document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Parse`] if the text is not a board document.
    pub fn from_json(text: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a board document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Io`] if the file cannot be read and
    /// [`BoardError::Parse`] if its contents are not a board document.
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let text = fs::read_to_string(path).map_err(|source| BoardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Number of undirected borders declared, counting each pair once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let mut pairs: Vec<(&str, &str)> = self
            .territories
            .iter()
            .flat_map(|(name, territory)| {
                territory.neighbors.iter().map(move |neighbor| {
                    if name.as_str() < neighbor.as_str() {
                        (name.as_str(), neighbor.as_str())
                    } else {
                        (neighbor.as_str(), name.as_str())
                    }
                })
            })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs.len()
    }
}
