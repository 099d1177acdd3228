//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - tile(id, x_coordinate, y_coordinate, type, created_at, updated_at)
//! - unit(id, name, x_coordinate, y_coordinate, type, fs, armor, speed, range, stealthed, health, created_at, updated_at)

pub mod schema;
pub mod sqlite;

pub use sqlite::TileStore;
