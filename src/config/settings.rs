//! User settings
//!
//! Stored as pretty-printed JSON in `config.json` under the base directory.
//! Missing fields fall back to their defaults, so older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::AppPaths;
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// SQLite file, relative to the base directory unless absolute
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// JSON-lines log file, relative to the base directory unless absolute
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Prefix for amounts in CLI output; storage never sees it
    #[serde(default)]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_database_file() -> String {
    "db.sqlite3".to_string()
}

fn default_log_file() -> String {
    "logs.txt".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            database_file: default_database_file(),
            log_file: default_log_file(),
            currency_symbol: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &AppPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    pub fn save(&self, paths: &AppPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
