//! # CLI Configuration
//!
//! Resolves where the database lives and how output is rendered.
//!
//! ## Configuration Sources (Priority Order)
//! 1. `--db <path>` flag
//! 2. `INVENTORY_DB_PATH` environment variable
//! 3. Platform data directory (`inventory.db`)
//!
//! ## Platform-Specific Paths
//! - **macOS**: `~/Library/Application Support/com.example.inventory/inventory.db`
//! - **Windows**: `%APPDATA%\example\inventory\data\inventory.db`
//! - **Linux**: `~/.local/share/inventory/inventory.db`

use directories::ProjectDirs;
use std::path::PathBuf;

use inventory_db::DbConfig;

use crate::error::{CliError, CliResult};

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "INVENTORY_DB_PATH";

/// File name used inside the platform data directory.
const DB_FILE_NAME: &str = "inventory.db";

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// SQLite file to open.
    pub database_path: PathBuf,

    /// Print JSON instead of a table.
    pub json: bool,
}

impl CliConfig {
    /// Builds the config from the parsed `--db` value (which clap already
    /// falls back to `INVENTORY_DB_PATH` for).
    pub fn resolve(db: Option<PathBuf>, json: bool) -> CliResult<Self> {
        let database_path = match db {
            Some(path) => path,
            None => default_database_path()?,
        };

        Ok(CliConfig {
            database_path,
            json,
        })
    }

    /// Database settings for this invocation.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
    }
}

/// Platform data directory path, created if missing.
fn default_database_path() -> CliResult<PathBuf> {
    let dirs = ProjectDirs::from("com", "example", "inventory")
        .ok_or_else(|| CliError::Config("could not determine app data directory".to_string()))?;

    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = CliConfig::resolve(Some(PathBuf::from("/tmp/stock.db")), true).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/stock.db"));
        assert!(config.json);
        assert_eq!(
            config.db_config().database_path,
            PathBuf::from("/tmp/stock.db")
        );
    }
}
