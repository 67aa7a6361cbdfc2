//! Configuration for the fleet CLI

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DB_PATH: &str = "data/fleets.db";

/// Environment variable overriding the default database location
pub const DB_PATH_ENV: &str = "DB_PATH";

/// Where the fleet database lives (`fleet.json` style file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetConfig {
    /// SQLite file, or `:memory:`
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl FleetConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// `--db` wins over `--config`, which wins over `DB_PATH`, which wins
    /// over the default.
    pub fn resolve(db_path: Option<PathBuf>, config_file: Option<&Path>) -> anyhow::Result<Self> {
        Self::resolve_with_env(db_path, config_file, std::env::var(DB_PATH_ENV).ok())
    }

    fn resolve_with_env(
        db_path: Option<PathBuf>,
        config_file: Option<&Path>,
        env_db_path: Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(db_path) = db_path {
            return Ok(Self { db_path });
        }
        if let Some(file) = config_file {
            return Self::from_file(file);
        }
        Ok(match env_db_path.filter(|value| !value.trim().is_empty()) {
            Some(value) => Self {
                db_path: PathBuf::from(value),
            },
            None => Self::default(),
        })
    }
}
