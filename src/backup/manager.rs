//! Backup manager for Livraria
//!
//! Takes byte-for-byte snapshots of the live database file and enforces the
//! retention policy. Snapshots are ordered by file modification time.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::paths::LibraryPaths;
use crate::config::settings::BackupRetention;
use crate::error::{LibraryError, LibraryResult};

/// File name prefix shared by every snapshot
pub const BACKUP_PREFIX: &str = "backup_livraria_";

/// File extension of every snapshot
const BACKUP_EXTENSION: &str = ".db";

/// Timestamp layout embedded in snapshot names (second resolution)
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Metadata about a backup
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// Filesystem modification time
    pub modified: DateTime<Local>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Manages snapshot creation and retention
#[derive(Debug, Clone)]
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Live database file that gets copied
    database_file: PathBuf,
    /// Retention policy
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &LibraryPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            database_file: paths.database_file(),
            retention,
        }
    }

    /// Snapshot the database using the current wall clock, then prune
    ///
    /// Returns the path to the created backup file.
    pub fn snapshot(&self) -> LibraryResult<PathBuf> {
        self.snapshot_at(Local::now())
    }

    /// Snapshot the database under the name for `timestamp`, then prune
    pub fn snapshot_at(&self, timestamp: DateTime<Local>) -> LibraryResult<PathBuf> {
        let backup_path = self.copy_snapshot_at(timestamp)?;
        self.prune()?;
        Ok(backup_path)
    }

    /// Snapshot the database without running the retention sweep
    pub fn copy_snapshot(&self) -> LibraryResult<PathBuf> {
        self.copy_snapshot_at(Local::now())
    }

    /// Copy the database to a snapshot named for `timestamp`
    ///
    /// If a snapshot for the same second already exists, a counter suffix is
    /// appended instead of overwriting it.
    fn copy_snapshot_at(&self, timestamp: DateTime<Local>) -> LibraryResult<PathBuf> {
        if !self.database_file.exists() {
            return Err(LibraryError::Backup(format!(
                "Database file does not exist: {}",
                self.database_file.display()
            )));
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LibraryError::Backup(format!("Failed to create backup directory: {}", e))
        })?;

        let backup_path = self.available_path(&timestamp.format(TIMESTAMP_FORMAT).to_string());

        fs::copy(&self.database_file, &backup_path).map_err(|e| {
            LibraryError::Backup(format!(
                "Failed to copy database to {}: {}",
                backup_path.display(),
                e
            ))
        })?;

        // Some platforms carry the source mtime over on copy; retention needs
        // the snapshot time.
        File::options()
            .write(true)
            .open(&backup_path)
            .and_then(|file| file.set_modified(SystemTime::now()))
            .map_err(|e| {
                LibraryError::Backup(format!("Failed to stamp backup file: {}", e))
            })?;

        info!(backup = %backup_path.display(), "created database snapshot");

        Ok(backup_path)
    }

    /// First unused snapshot path for a timestamp string
    fn available_path(&self, stamp: &str) -> PathBuf {
        let base = self
            .backup_dir
            .join(format!("{}{}{}", BACKUP_PREFIX, stamp, BACKUP_EXTENSION));
        if !base.exists() {
            return base;
        }

        let mut counter = 1u32;
        loop {
            let candidate = self.backup_dir.join(format!(
                "{}{}_{}{}",
                BACKUP_PREFIX, stamp, counter, BACKUP_EXTENSION
            ));
            if !candidate.exists() {
                return candidate;
            }
            counter += 1;
        }
    }

    /// List all snapshots, newest first
    pub fn list_backups(&self) -> LibraryResult<Vec<BackupInfo>> {
        let mut backups = self.scan()?;
        backups.reverse();
        Ok(backups)
    }

    /// Snapshots sorted by modification time ascending
    ///
    /// Ties fall back to the timestamp in the name, then the numeric counter
    /// suffix, so `_2` precedes `_10`.
    fn scan(&self) -> LibraryResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            LibraryError::Backup(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                LibraryError::Backup(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.is_file() && is_backup_name(&path) {
                backups.push(read_backup_info(&path)?);
            }
        }

        backups.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| name_order_key(&a.filename).cmp(&name_order_key(&b.filename)))
        });

        Ok(backups)
    }

    /// Delete all but the newest `keep_count` snapshots
    ///
    /// Returns the paths that were removed.
    pub fn prune(&self) -> LibraryResult<Vec<PathBuf>> {
        let backups = self.scan()?;
        let keep = self.retention.keep_count as usize;
        let excess = backups.len().saturating_sub(keep);
        let mut deleted = Vec::with_capacity(excess);

        for backup in backups.into_iter().take(excess) {
            fs::remove_file(&backup.path).map_err(|e| {
                LibraryError::Backup(format!("Failed to delete old backup: {}", e))
            })?;
            debug!(backup = %backup.filename, "pruned old snapshot");
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            info!(deleted = deleted.len(), keep, "retention sweep removed snapshots");
        }

        Ok(deleted)
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Get the live database path this manager copies
    pub fn database_file(&self) -> &PathBuf {
        &self.database_file
    }

    /// Get the most recent backup
    pub fn latest_backup(&self) -> LibraryResult<Option<BackupInfo>> {
        Ok(self.scan()?.pop())
    }

    /// Resolve `latest`, a snapshot file name, or a path to a backup
    pub fn find_backup(&self, identifier: &str) -> LibraryResult<BackupInfo> {
        if identifier == "latest" {
            return self
                .latest_backup()?
                .ok_or_else(|| LibraryError::backup_not_found(identifier));
        }

        let in_dir = self.backup_dir.join(identifier);
        if in_dir.is_file() {
            return read_backup_info(&in_dir);
        }

        let as_path = Path::new(identifier);
        if as_path.is_file() {
            return read_backup_info(as_path);
        }

        Err(LibraryError::backup_not_found(identifier))
    }
}

/// Check whether a path looks like `backup_livraria_*.db`
fn is_backup_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| {
            name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_EXTENSION)
        })
}

/// Split a snapshot name into its stem and same-second counter (0 if none)
fn name_order_key(filename: &str) -> (&str, u32) {
    let stem = filename.strip_suffix(BACKUP_EXTENSION).unwrap_or(filename);
    stem.rsplit_once('_')
        .and_then(|(head, tail)| Some((head, tail.parse().ok()?)))
        .unwrap_or((stem, 0))
}

fn read_backup_info(path: &Path) -> LibraryResult<BackupInfo> {
    let metadata = fs::metadata(path)
        .map_err(|e| LibraryError::Backup(format!("Failed to stat {}: {}", path.display(), e)))?;
    let modified = metadata
        .modified()
        .map_err(|e| LibraryError::Backup(format!("No modification time for {}: {}", path.display(), e)))?;

    Ok(BackupInfo {
        filename: path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default(),
        path: path.to_path_buf(),
        modified: DateTime::<Local>::from(modified),
        size_bytes: metadata.len(),
    })
}
