use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default port for the HTTP server
pub const DEFAULT_PORT: u16 = 6080;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GridworldConfig {
    pub port: Option<u16>,
    pub database: Option<String>,
    pub seed: Option<u64>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("gridworld.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("gridworld.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<GridworldConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: GridworldConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
