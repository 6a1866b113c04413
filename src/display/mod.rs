//! Display formatting for terminal output
//!
//! Formats books and backups as aligned tables for the command line, and as
//! one-line records for the interactive menu.

pub mod backup;
pub mod book;

pub use backup::format_backup_list;
pub use book::{format_book_lines, format_book_table};
