//! User settings for Livraria
//!
//! Manages user preferences: backup retention and display currency.

use serde::{Deserialize, Serialize};

use super::paths::LibraryPaths;
use crate::error::LibraryError;

/// How many snapshots survive a retention sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of most recent snapshots to keep
    pub keep_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self { keep_count: 5 }
    }
}

/// User settings for Livraria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Snapshot retention
    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Currency symbol used when printing prices
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_retention: BackupRetention::default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Read `config.json`, falling back to defaults when it is absent
    pub fn load_or_create(paths: &LibraryPaths) -> Result<Self, LibraryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LibraryError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LibraryError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LibraryPaths) -> Result<(), LibraryError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LibraryError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            LibraryError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
