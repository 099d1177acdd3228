//! Gridworld CLI - entry point for the tile map server

use clap::Parser;
use gridworld::config;
use gridworld::server::{self, AppState};
use gridworld::storage::TileStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "gridworld")]
#[command(version = "0.0.1")]
#[command(about = "Tile map service for a grid-based game world")]
#[command(long_about = r#"
Gridworld serves a persistent tile map over HTTP, enabling:
  • Tile creation and lookup by id or grid coordinates
  • Full-map listing for client rendering
  • One-shot random terrain generation for a fresh world

Example usage:
  gridworld --port 6080
  gridworld --database world/tiles.db --seed 42
"#)]
struct Cli {
    /// Port for the HTTP server
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Seed for the terrain generator (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Flags win over the config file; defaults fill whatever is left.
    let file_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    let port = cli.port.or(file_config.port).unwrap_or(config::DEFAULT_PORT);
    let database = cli
        .database
        .or(file_config.database.map(PathBuf::from))
        .unwrap_or_else(config::default_database_path);
    let seed = cli.seed.or(file_config.seed);

    config::ensure_db_dir(&database)?;
    let store = TileStore::open(&database)?;

    tracing::info!("Opened tile store at {:?}", database);
    println!("🗄️  Database: {:?}", database);
    if let Some(seed) = seed {
        println!("🎲 Terrain seed: {}", seed);
    }

    let state = Arc::new(AppState::new(store, seed));
    server::start_server(port, state).await
}
