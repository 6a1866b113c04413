//! Backup CLI commands
//!
//! Implements CLI commands for snapshot management. These run without an
//! open catalog so a restore can replace the database file.

use clap::Subcommand;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::LibraryPaths;
use crate::config::settings::Settings;
use crate::display::format_backup_list;
use crate::error::LibraryResult;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot the database now
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Delete snapshots beyond the retention count
    Prune,

    /// Replace the database with a snapshot
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &LibraryPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> LibraryResult<()> {
    let manager = BackupManager::new(paths, settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let backup_path = manager.snapshot()?;
            println!("Backup created: {}", backup_path.display());
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;
            print!("{}", format_backup_list(&backups, verbose));
        }

        BackupCommands::Prune => {
            let deleted = manager.prune()?;
            println!(
                "Deleted {} backup(s); keeping the newest {}.",
                deleted.len(),
                settings.backup_retention.keep_count
            );
        }

        BackupCommands::Restore { backup, force } => {
            let info = manager.find_backup(&backup)?;
            let restore_manager = RestoreManager::new(paths.clone());
            let validation = restore_manager.validate_backup(&info.path)?;

            println!("File: {}", info.path.display());
            println!("Modified: {}", info.modified.format("%Y-%m-%d %H:%M:%S"));
            println!("Status: {}", validation.summary());
            println!();

            if !force {
                println!("WARNING: This will overwrite the current catalog!");
                println!("To proceed, run again with --force flag:");
                println!("  livraria backup restore {} --force", backup);
                return Ok(());
            }

            // Pruning waits until after the restore, since the chosen
            // snapshot may be the oldest one.
            if manager.database_file().exists() {
                let pre_restore = manager.copy_snapshot()?;
                println!("Pre-restore backup saved: {}", pre_restore.display());
            }

            let result = restore_manager.restore_from_file(&info.path)?;
            manager.prune()?;
            println!("{}", result.summary());
        }
    }

    Ok(())
}
