//! CLI command handlers
//!
//! This module contains the implementation of CLI commands and the
//! interactive menu, bridging user input with the catalog.

pub mod audit;
pub mod backup;
pub mod book;
pub mod menu;

pub use audit::{handle_audit_command, AuditArgs};
pub use backup::{handle_backup_command, BackupCommands};
pub use book::{handle_book_command, BookCommands};
pub use menu::run_menu;
