//! Database schema definitions

/// SQL to create the tile table
pub const CREATE_TILE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tile (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    x_coordinate INTEGER,
    y_coordinate INTEGER,
    type TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the unit table
/// Units occupy tiles; the table ships with the world schema but has no
/// handlers yet.
pub const CREATE_UNIT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS unit (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    x_coordinate INTEGER,
    y_coordinate INTEGER,
    type TEXT,
    fs INTEGER,
    armor INTEGER,
    speed INTEGER,
    range INTEGER,
    stealthed BOOLEAN,
    health INTEGER,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create indexes
/// Lookup index only; coordinate pairs carry no uniqueness constraint.
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_tile_coordinates ON tile(x_coordinate, y_coordinate)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_TILE_TABLE, CREATE_UNIT_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
