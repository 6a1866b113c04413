//! Path management for Livraria
//!
//! All files live under a single data root.
//!
//! ## Path Resolution Order
//!
//! 1. `LIVRARIA_DATA_DIR` environment variable (if set)
//! 2. The current working directory

use std::path::PathBuf;

use crate::error::LibraryError;

/// Name of the application directory holding backups, exports and settings
const APP_DIR: &str = "meu_sistema_livraria";

/// File name of the CSV used by export and import
pub const EXPORT_FILE_NAME: &str = "livros_exportados.csv";

/// Manages all paths used by Livraria
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    /// Data root that every other path is relative to
    base_dir: PathBuf,
}

impl LibraryPaths {
    /// Create a new LibraryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, LibraryError> {
        let base_dir = if let Ok(custom) = std::env::var("LIVRARIA_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            std::env::current_dir().map_err(|e| {
                LibraryError::Config(format!("Could not determine working directory: {}", e))
            })?
        };

        Ok(Self { base_dir })
    }

    /// Create LibraryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the data root
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the database file (`data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Directory holding settings, backups and exports
    pub fn app_dir(&self) -> PathBuf {
        self.base_dir.join(APP_DIR)
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.app_dir().join("backups")
    }

    /// Get the exports directory
    pub fn exports_dir(&self) -> PathBuf {
        self.app_dir().join("exports")
    }

    /// Path to the live database file
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("livraria.db")
    }

    /// Path to the CSV file used by export and import
    pub fn export_file(&self) -> PathBuf {
        self.exports_dir().join(EXPORT_FILE_NAME)
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.app_dir().join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.app_dir().join("audit.log")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LibraryError> {
        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LibraryError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| LibraryError::Io(format!("Failed to create backup directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir())
            .map_err(|e| LibraryError::Io(format!("Failed to create exports directory: {}", e)))?;

        Ok(())
    }
}
