//! Backup restoration for Livraria
//!
//! Replaces the live database file with a validated snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::info;

use crate::config::paths::LibraryPaths;
use crate::error::{LibraryError, LibraryResult};
use crate::storage::schema;

/// Handles restoring from backups
pub struct RestoreManager {
    paths: LibraryPaths,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: LibraryPaths) -> Self {
        Self { paths }
    }

    /// Restore the database from a snapshot file
    ///
    /// This overwrites the live database. Take a snapshot of the current
    /// state first, and close any open catalog before calling.
    pub fn restore_from_file(&self, backup_path: &Path) -> LibraryResult<RestoreResult> {
        let validation = self.validate_backup(backup_path)?;
        if !validation.is_valid {
            return Err(LibraryError::Backup(format!(
                "{} is not a valid catalog snapshot: {}",
                backup_path.display(),
                validation.summary()
            )));
        }

        fs::create_dir_all(self.paths.data_dir()).map_err(|e| {
            LibraryError::Io(format!("Failed to create data directory: {}", e))
        })?;

        let target = self.paths.database_file();
        let bytes_copied = fs::copy(backup_path, &target).map_err(|e| {
            LibraryError::Backup(format!("Failed to restore {}: {}", target.display(), e))
        })?;

        info!(source = %backup_path.display(), books = validation.book_count, "restored database");

        Ok(RestoreResult {
            source: backup_path.to_path_buf(),
            book_count: validation.book_count,
            bytes_copied,
        })
    }

    /// Validate a snapshot without restoring it
    ///
    /// A file that SQLite cannot read, or that lacks the `livros` table, is
    /// reported as invalid rather than as an error.
    pub fn validate_backup(&self, backup_path: &Path) -> LibraryResult<ValidationResult> {
        if !backup_path.is_file() {
            return Err(LibraryError::backup_not_found(
                backup_path.display().to_string(),
            ));
        }

        match inspect_snapshot(backup_path) {
            Ok(Some(book_count)) => Ok(ValidationResult {
                is_valid: true,
                book_count,
                problem: None,
            }),
            Ok(None) => Ok(ValidationResult {
                is_valid: false,
                book_count: 0,
                problem: Some(format!("missing table '{}'", schema::BOOKS_TABLE)),
            }),
            Err(e) => Ok(ValidationResult {
                is_valid: false,
                book_count: 0,
                problem: Some(e.to_string()),
            }),
        }
    }
}

/// Count books in a snapshot, or `None` if the table is absent
fn inspect_snapshot(path: &Path) -> rusqlite::Result<Option<usize>> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    if !schema::has_books_table(&conn)? {
        return Ok(None);
    }
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", schema::BOOKS_TABLE),
        [],
        |row| row.get(0),
    )?;
    Ok(Some(count as usize))
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    /// Snapshot that was restored
    pub source: PathBuf,
    /// Number of books in the restored catalog
    pub book_count: usize,
    /// Bytes written to the live database file
    pub bytes_copied: u64,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!(
            "Restored {} book(s) from {}",
            self.book_count,
            self.source
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| self.source.display().to_string())
        )
    }
}

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    /// Whether the snapshot can be restored
    pub is_valid: bool,
    /// Number of books in the snapshot
    pub book_count: usize,
    /// Why the snapshot is invalid
    pub problem: Option<String>,
}

impl ValidationResult {
    pub fn summary(&self) -> String {
        match &self.problem {
            None => format!("Valid snapshot with {} book(s)", self.book_count),
            Some(problem) => format!("Invalid snapshot: {}", problem),
        }
    }
}
