//! SQLite schema creation.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{LibraryError, LibraryResult};

/// Name of the catalog table
pub const BOOKS_TABLE: &str = "livros";

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS livros (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo TEXT NOT NULL,
    autor TEXT NOT NULL,
    ano_publicacao INTEGER NOT NULL,
    preco REAL NOT NULL
);
";

/// Create the catalog table if it doesn't exist.
///
/// Idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> LibraryResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Open or create the catalog database at the given path.
///
/// The default rollback journal is kept so every committed statement lands
/// in the main file, which snapshots copy as-is.
pub fn open_database(path: &Path) -> LibraryResult<Connection> {
    let conn = Connection::open(path).map_err(|e| {
        LibraryError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the schema. Useful for testing.
pub fn open_memory() -> LibraryResult<Connection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Check whether a database contains the catalog table
pub fn has_books_table(conn: &Connection) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [BOOKS_TABLE],
        |row| row.get(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_memory_has_table() {
        let conn = open_memory().unwrap();
        assert!(has_books_table(&conn).unwrap());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = open_memory().unwrap();
        conn.execute(
            "INSERT INTO livros (titulo, autor, ano_publicacao, preco) VALUES ('Dune', 'Herbert', 1965, 39.9)",
            [],
        )
        .unwrap();

        create_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM livros", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_database_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("livraria.db");

        let conn = open_database(&path).unwrap();
        assert!(path.exists());
        assert!(has_books_table(&conn).unwrap());
    }

    #[test]
    fn test_open_database_in_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no").join("such").join("livraria.db");

        let err = open_database(&path).unwrap_err();
        assert!(matches!(err, LibraryError::Storage(_)));
    }
}
