//! Storage layer for Livraria
//!
//! A single SQLite file holds the catalog. Every mutation is preceded by a
//! snapshot of that file and followed by an audit entry.

pub mod books;
pub mod schema;

use rusqlite::Connection;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::backup::BackupManager;
use crate::config::paths::LibraryPaths;
use crate::config::settings::Settings;
use crate::error::LibraryResult;
use crate::models::{Book, BookId, NewBook};

/// Owned handle to the catalog database
///
/// Constructed once at startup and passed by reference to every caller.
pub struct Catalog {
    paths: LibraryPaths,
    conn: Connection,
    backups: BackupManager,
    audit: AuditLogger,
}

impl Catalog {
    /// Open the catalog, creating directories, the database file and the
    /// `livros` table as needed
    pub fn open(paths: &LibraryPaths, settings: &Settings) -> LibraryResult<Self> {
        paths.ensure_directories()?;

        let conn = schema::open_database(&paths.database_file())?;
        debug!(database = %paths.database_file().display(), "opened catalog");

        Ok(Self {
            backups: BackupManager::new(paths, settings.backup_retention.clone()),
            audit: AuditLogger::new(paths.audit_log()),
            paths: paths.clone(),
            conn,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LibraryPaths {
        &self.paths
    }

    /// The backup manager used before every mutation
    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// The audit log mutations are recorded in
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Snapshot, then insert a new book
    ///
    /// Returns the stored book with its assigned id.
    pub fn add(&self, book: &NewBook) -> LibraryResult<Book> {
        self.backups.snapshot()?;

        let id = books::insert_book(&self.conn, book)?;
        let stored = book.clone().with_id(id);
        debug!(id, title = %stored.title, "inserted book");

        self.record(&AuditEntry::create(&stored));
        Ok(stored)
    }

    /// All books in insertion (id) order
    pub fn list(&self) -> LibraryResult<Vec<Book>> {
        books::all_books(&self.conn)
    }

    /// Look up a book by id
    pub fn get(&self, id: BookId) -> LibraryResult<Option<Book>> {
        books::book_by_id(&self.conn, id)
    }

    /// Snapshot, then set the price of every book whose title matches exactly
    ///
    /// Returns the number of matched books; zero is not an error.
    pub fn update_price(&self, title: &str, new_price: f64) -> LibraryResult<usize> {
        self.backups.snapshot()?;

        let before = books::books_by_title(&self.conn, title)?;
        let matched = books::update_price_by_title(&self.conn, title, new_price)?;
        if matched == 0 {
            warn!(title, "price update matched no books");
        }

        self.record(&AuditEntry::update_price(title, new_price, &before));
        Ok(matched)
    }

    /// Snapshot, then delete every book whose title matches exactly
    ///
    /// Returns the number of removed books; zero is not an error.
    pub fn delete(&self, title: &str) -> LibraryResult<usize> {
        self.backups.snapshot()?;

        let before = books::books_by_title(&self.conn, title)?;
        let removed = books::delete_by_title(&self.conn, title)?;
        if removed == 0 {
            warn!(title, "delete matched no books");
        }

        self.record(&AuditEntry::delete(title, &before));
        Ok(removed)
    }

    /// Books whose author matches exactly; empty when there are none
    pub fn find_by_author(&self, author: &str) -> LibraryResult<Vec<Book>> {
        books::books_by_author(&self.conn, author)
    }

    /// Append an audit entry for a mutation that has already committed
    ///
    /// A failed write is logged and swallowed so callers never see an error
    /// for a change that is in the database.
    fn record(&self, entry: &AuditEntry) {
        if let Err(e) = self.audit.log(entry) {
            warn!(
                operation = %entry.operation,
                subject = %entry.subject,
                error = %e,
                "failed to write audit entry"
            );
        }
    }
}
