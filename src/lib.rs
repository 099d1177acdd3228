//! # Gridworld - tile map backend for a grid-based game world
//!
//! A small HTTP service persisting the world's tile grid in SQLite.
//!
//! Gridworld provides:
//! - A `tile` table with position, terrain type, and store-assigned timestamps
//! - SQLite-backed CRUD plus coordinate lookup over a single shared connection
//! - Bulk grid initialization with seedable random terrain assignment
//! - A JSON HTTP API (axum) mapping each route to exactly one storage call

pub mod config;
pub mod server;
pub mod storage;
pub mod tile;

// Re-exports for convenient access
pub use storage::TileStore;
pub use tile::{NewTile, Terrain, Tile, TileUpdate};

/// Result type alias for Gridworld operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Gridworld operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Tile not found: {0}")]
    TileNotFound(String),

    #[error("Unknown terrain type: {0}")]
    UnknownTerrain(String),
}
