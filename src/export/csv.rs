//! CSV Export functionality
//!
//! One header row followed by one row per book in storage order.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::error::{LibraryError, LibraryResult};
use crate::models::Book;
use crate::storage::Catalog;

/// Header row of the export file
pub const CSV_HEADER: [&str; 5] = ["ID", "Título", "Autor", "Ano de Publicação", "Preço"];

/// Where an export went and how much it contained
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub book_count: usize,
}

/// Write books as CSV to any writer
pub fn write_books_csv<W: Write>(books: &[Book], writer: W) -> LibraryResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for book in books {
        csv_writer.write_record([
            book.id.to_string(),
            book.title.clone(),
            book.author.clone(),
            book.publication_year.to_string(),
            book.price.to_string(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| LibraryError::Export(e.to_string()))
}

/// Export the whole catalog to the configured export file, replacing it
pub fn export_catalog_csv(catalog: &Catalog) -> LibraryResult<ExportSummary> {
    let path = catalog.paths().export_file();
    let books = catalog.list()?;

    let file = File::create(&path).map_err(|e| {
        LibraryError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    write_books_csv(&books, file)?;

    info!(path = %path.display(), books = books.len(), "exported catalog");

    Ok(ExportSummary {
        path,
        book_count: books.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LibraryPaths, Settings};
    use crate::models::NewBook;
    use tempfile::TempDir;

    fn create_test_catalog() -> (TempDir, Catalog) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let catalog = Catalog::open(&paths, &Settings::default()).unwrap();
        (temp_dir, catalog)
    }

    #[test]
    fn test_write_books_csv() {
        let books = vec![
            NewBook::new("Dune", "Herbert", 1965, 39.9).with_id(1),
            NewBook::new("Crime, Punishment", "Dostoevsky", 1866, 22.5).with_id(2),
        ];

        let mut output = Vec::new();
        write_books_csv(&books, &mut output).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<_> = csv_string.lines().collect();
        assert_eq!(lines[0], "ID,Título,Autor,Ano de Publicação,Preço");
        assert_eq!(lines[1], "1,Dune,Herbert,1965,39.9");
        assert_eq!(lines[2], "2,\"Crime, Punishment\",Dostoevsky,1866,22.5");
    }

    #[test]
    fn test_empty_catalog_writes_header_only() {
        let mut output = Vec::new();
        write_books_csv(&[], &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "ID,Título,Autor,Ano de Publicação,Preço\n"
        );
    }

    #[test]
    fn test_export_overwrites_file() {
        let (_temp, catalog) = create_test_catalog();
        catalog.add(&NewBook::new("Dune", "Herbert", 1965, 39.9)).unwrap();
        catalog.add(&NewBook::new("Emma", "Austen", 1815, 25.0)).unwrap();
        let first = export_catalog_csv(&catalog).unwrap();
        assert_eq!(first.book_count, 2);

        catalog.delete("Emma").unwrap();
        let second = export_catalog_csv(&catalog).unwrap();
        assert_eq!(second.path, first.path);

        let contents = std::fs::read_to_string(&second.path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(!contents.contains("Emma"));
    }
}
