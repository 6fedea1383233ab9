// Runtime configuration, read from environment variables. Every setting
// has a default, so the binary runs with an empty environment.

use crate::dao::SqliteCountryDao;
use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::PathBuf;

pub const DB_VAR: &str = "PUBLICDATA_DB";
pub const SEED_VAR: &str = "PUBLICDATA_SEED";
pub const LOG_VAR: &str = "PUBLICDATA_LOG";

const MEMORY: &str = ":memory:";

/// Where the country table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseLocation,
    /// JSON file used to populate an empty database; the bundled data set
    /// is used when this is `None`.
    pub seed_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

/// `<data dir>/publicdata/publicdata.db`, or the working directory when the
/// platform has no data dir.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("publicdata")
        .join("publicdata.db")
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = match get(DB_VAR) {
            Some(v) if v == MEMORY => DatabaseLocation::Memory,
            Some(v) => DatabaseLocation::File(PathBuf::from(v)),
            None => DatabaseLocation::File(default_database_path()),
        };

        let log_level = match get(LOG_VAR) {
            Some(v) => v
                .parse::<LevelFilter>()
                .with_context(|| format!("{LOG_VAR}: invalid log level '{v}'"))?,
            None => LevelFilter::Warn,
        };

        Ok(Config {
            database,
            seed_path: get(SEED_VAR).map(PathBuf::from),
            log_level,
        })
    }

    /// Open the configured database, creating parent directories as needed.
    pub fn open_dao(&self) -> Result<SqliteCountryDao> {
        match &self.database {
            DatabaseLocation::Memory => {
                SqliteCountryDao::open_in_memory().context("Failed to open in-memory database")
            }
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
                SqliteCountryDao::open(path)
                    .with_context(|| format!("Failed to open database {}", path.display()))
            }
        }
    }
}
