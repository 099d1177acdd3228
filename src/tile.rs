//! Tile types - the grid world's persisted map cell
//!
//! A tile is one cell of the world grid: a coordinate pair plus a terrain
//! type. Terrain names form a closed vocabulary:
//! - `Mountain`: high ground
//! - `Grass`: open ground
//! - `Water`: open water
//!
//! The vocabulary is advisory at the API boundary: handlers store whatever
//! string the client sends, and only grid initialization draws from the
//! closed set.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Terrain types a generated world is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// High ground
    Mountain,
    /// Open ground
    Grass,
    /// Open water
    Water,
}

impl Terrain {
    /// Get the string representation of the terrain type
    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Mountain => "mountain",
            Terrain::Grass => "grass",
            Terrain::Water => "water",
        }
    }

    /// Get all terrain types
    pub fn all() -> &'static [Terrain] {
        &[Terrain::Mountain, Terrain::Grass, Terrain::Water]
    }

    /// Draw a terrain type uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> Terrain {
        let all = Terrain::all();
        all[rng.gen_range(0..all.len())]
    }
}

impl FromStr for Terrain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mountain" => Ok(Terrain::Mountain),
            "grass" => Ok(Terrain::Grass),
            "water" => Ok(Terrain::Water),
            _ => Err(Error::UnknownTerrain(s.to_string())),
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tile row as stored, with store-assigned identifier and timestamps.
///
/// Serializes to the wire format the game client speaks: `id`,
/// `x_coordinate`, `y_coordinate`, `type`, `created_at`, `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Store-assigned identifier, immutable once created
    pub id: i64,
    /// Grid column
    pub x_coordinate: i64,
    /// Grid row
    pub y_coordinate: i64,
    /// Terrain type as stored; not constrained to [`Terrain`] at this boundary
    #[serde(rename = "type")]
    pub kind: String,
    /// Set by the store when the row is inserted
    pub created_at: DateTime<Utc>,
    /// Refreshed by every update
    pub updated_at: DateTime<Utc>,
}

impl Tile {
    /// Parse the stored terrain string, if it names a known type
    pub fn terrain(&self) -> Option<Terrain> {
        self.kind.parse().ok()
    }
}

/// Payload for creating a tile. Absent fields decode to zero values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTile {
    pub x_coordinate: i64,
    pub y_coordinate: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl NewTile {
    /// Create a new tile payload
    pub fn new(x_coordinate: i64, y_coordinate: i64, kind: impl Into<String>) -> Self {
        Self {
            x_coordinate,
            y_coordinate,
            kind: kind.into(),
        }
    }
}

/// Payload for a full-record update, addressed by id.
///
/// Absent fields decode to zero values; an id that matches no row is not an
/// error at the storage boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TileUpdate {
    pub id: i64,
    pub x_coordinate: i64,
    pub y_coordinate: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TileUpdate {
    /// Create an update payload for the tile with the given id
    pub fn new(id: i64, x_coordinate: i64, y_coordinate: i64, kind: impl Into<String>) -> Self {
        Self {
            id,
            x_coordinate,
            y_coordinate,
            kind: kind.into(),
        }
    }
}
