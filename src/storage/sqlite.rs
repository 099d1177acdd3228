//! SQLite storage implementation

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rand::Rng;
use rusqlite::{Connection, OptionalExtension, params};

use super::schema;
use crate::tile::{NewTile, Terrain, Tile, TileUpdate};
use crate::{Error, Result};

/// SQLite-backed storage for the tile grid.
///
/// Owns the process-wide connection; every operation locks it, runs its
/// statement, and returns. There are no transactions and no retries.
pub struct TileStore {
    conn: Mutex<Connection>,
}

impl TileStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock().expect("tile store mutex poisoned");
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Insert a new tile and return it as stored.
    ///
    /// Timestamps are store defaults; the row is re-read after the insert so
    /// the returned timestamps are the store's, not the caller's.
    pub fn create(&self, tile: &NewTile) -> Result<Tile> {
        let id = {
            let conn = self.conn.lock().expect("tile store mutex poisoned");
            conn.execute(
                r#"
                INSERT INTO tile (x_coordinate, y_coordinate, type)
                VALUES (?1, ?2, ?3)
                "#,
                params![tile.x_coordinate, tile.y_coordinate, tile.kind],
            )?;
            conn.last_insert_rowid()
        };

        self.get_by_id(id)
    }

    /// Get a tile by id
    pub fn get_by_id(&self, id: i64) -> Result<Tile> {
        let conn = self.conn.lock().expect("tile store mutex poisoned");
        conn.query_row(
            "SELECT id, x_coordinate, y_coordinate, type, created_at, updated_at FROM tile WHERE id = ?1",
            [id],
            row_to_tile,
        )
        .optional()?
        .ok_or_else(|| Error::TileNotFound(format!("id {}", id)))
    }

    /// Get the tile at the given coordinates.
    ///
    /// Coordinate pairs are not unique in the schema; when several rows share
    /// a cell, the first row in store-native order wins.
    pub fn get_by_coordinates(&self, x: i64, y: i64) -> Result<Tile> {
        let conn = self.conn.lock().expect("tile store mutex poisoned");
        conn.query_row(
            "SELECT id, x_coordinate, y_coordinate, type, created_at, updated_at FROM tile WHERE x_coordinate = ?1 AND y_coordinate = ?2",
            params![x, y],
            row_to_tile,
        )
        .optional()?
        .ok_or_else(|| Error::TileNotFound(format!("coordinates ({}, {})", x, y)))
    }

    /// Overwrite coordinates and type for the row matching the given id.
    ///
    /// `updated_at` is set to the current time. Zero affected rows is not an
    /// error; unknown ids are silently accepted.
    pub fn update(&self, tile: &TileUpdate) -> Result<()> {
        let conn = self.conn.lock().expect("tile store mutex poisoned");
        conn.execute(
            r#"
            UPDATE tile
            SET x_coordinate = ?1, y_coordinate = ?2, type = ?3, updated_at = ?4
            WHERE id = ?5
            "#,
            params![
                tile.x_coordinate,
                tile.y_coordinate,
                tile.kind,
                Utc::now(),
                tile.id,
            ],
        )?;
        Ok(())
    }

    /// Delete the tile with the given id. No-op when no such row exists.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().expect("tile store mutex poisoned");
        conn.execute("DELETE FROM tile WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Get every tile, in store-native order
    pub fn get_all(&self) -> Result<Vec<Tile>> {
        let conn = self.conn.lock().expect("tile store mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, x_coordinate, y_coordinate, type, created_at, updated_at FROM tile",
        )?;

        let tiles = stmt
            .query_map([], row_to_tile)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tiles)
    }

    /// Create one tile per coordinate pair in `0..=max_x` x `0..=max_y`,
    /// each with a terrain type drawn from the given source of randomness.
    ///
    /// Insertion proceeds row-major (all y for x = 0, then x = 1, ...). The
    /// connection is locked per insert, not across the loop, so concurrent
    /// tile creation interleaves with a running initialization. Aborts on the
    /// first failed insert, leaving rows already created in place. Returns
    /// the number of tiles created.
    pub fn initialize_grid<R: Rng>(&self, max_x: i64, max_y: i64, rng: &mut R) -> Result<usize> {
        let mut created = 0;
        for x in 0..=max_x {
            for y in 0..=max_y {
                let terrain = Terrain::random(rng);
                self.create(&NewTile::new(x, y, terrain.as_str()))?;
                created += 1;
            }
        }
        Ok(created)
    }
}

/// Helper to convert a row to a Tile
fn row_to_tile(row: &rusqlite::Row) -> rusqlite::Result<Tile> {
    Ok(Tile {
        id: row.get(0)?,
        x_coordinate: row.get(1)?,
        y_coordinate: row.get(2)?,
        kind: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
