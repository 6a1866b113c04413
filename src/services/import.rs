//! CSV Import service
//!
//! Reads the export format back into the catalog. Every row is parsed before
//! anything is added, so one malformed row aborts the whole import.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::info;

use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, NewBook};
use crate::storage::Catalog;

/// Column positions in the export format
const TITLE_COLUMN: usize = 1;
const AUTHOR_COLUMN: usize = 2;
const YEAR_COLUMN: usize = 3;
const PRICE_COLUMN: usize = 4;

/// Result of a completed import
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// Books added, with the ids the catalog assigned
    pub imported: Vec<Book>,
}

impl ImportResult {
    pub fn count(&self) -> usize {
        self.imported.len()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    catalog: &'a Catalog,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Import the catalog's configured export file
    pub fn import_default_file(&self) -> LibraryResult<ImportResult> {
        self.import_file(&self.catalog.paths().export_file())
    }

    /// Import books from a CSV file
    pub fn import_file(&self, path: &Path) -> LibraryResult<ImportResult> {
        let file = File::open(path).map_err(|e| {
            LibraryError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let result = self.import_from_reader(file)?;
        info!(path = %path.display(), books = result.count(), "imported catalog");
        Ok(result)
    }

    /// Parse every row, then add each book in file order
    pub fn import_from_reader<R: Read>(&self, reader: R) -> LibraryResult<ImportResult> {
        let books = parse_books_csv(reader)?;

        let mut imported = Vec::with_capacity(books.len());
        for book in &books {
            imported.push(self.catalog.add(book)?);
        }

        Ok(ImportResult { imported })
    }
}

/// Parse CSV rows (header skipped) into books
///
/// The id column is ignored; ids are reassigned on insert.
pub fn parse_books_csv<R: Read>(reader: R) -> LibraryResult<Vec<NewBook>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut books = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        // Header is line 1
        let fallback_line = index + 2;
        let record = result.map_err(|e| {
            let line = e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(fallback_line);
            LibraryError::parse(line, format!("Error reading CSV record: {}", e))
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        books.push(parse_record(&record, line)?);
    }

    Ok(books)
}

fn parse_record(record: &StringRecord, line: usize) -> LibraryResult<NewBook> {
    let field = |column: usize, name: &str| {
        record
            .get(column)
            .ok_or_else(|| LibraryError::parse(line, format!("Missing {} column", name)))
    };

    let title = field(TITLE_COLUMN, "title")?;
    let author = field(AUTHOR_COLUMN, "author")?;

    let year_str = field(YEAR_COLUMN, "publication year")?.trim();
    let publication_year = year_str.parse::<i32>().map_err(|_| {
        LibraryError::parse(line, format!("Invalid publication year: '{}'", year_str))
    })?;

    let price_str = field(PRICE_COLUMN, "price")?.trim();
    let price = price_str
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| LibraryError::parse(line, format!("Invalid price: '{}'", price_str)))?;

    Ok(NewBook::new(title, author, publication_year, price))
}
