//! Backup system for Livraria
//!
//! Provides automatic snapshots of the database file with a retention policy,
//! and restore functionality.
//!
//! # Architecture
//!
//! The backup system consists of two main components:
//!
//! - `BackupManager`: Copies the live database to a timestamped snapshot and
//!   prunes old snapshots
//! - `RestoreManager`: Validates and restores snapshots
//!
//! # Backup Format
//!
//! A snapshot is a byte-for-byte copy of the SQLite database file named
//! `backup_livraria_<YYYY-MM-DD_HH-MM-SS>.db`. A second snapshot within the
//! same second gets a `_<n>` counter before the extension.
//!
//! # Retention Policy
//!
//! After each snapshot the newest five files (by modification time) are kept
//! and the rest are deleted. The count comes from `BackupRetention`.
//!
//! # Example
//!
//! ```rust,ignore
//! use livraria::backup::{BackupManager, RestoreManager};
//! use livraria::config::{paths::LibraryPaths, settings::BackupRetention};
//!
//! let paths = LibraryPaths::new()?;
//! let backup_manager = BackupManager::new(&paths, BackupRetention::default());
//! let backup_path = backup_manager.snapshot()?;
//!
//! // Later, restore from backup
//! let restore_manager = RestoreManager::new(paths);
//! let result = restore_manager.restore_from_file(&backup_path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager, BACKUP_PREFIX};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
