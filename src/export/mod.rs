//! Export module for Livraria
//!
//! Writes the catalog to the spreadsheet-compatible CSV file that the import
//! service reads back.

pub mod csv;

pub use self::csv::{export_catalog_csv, write_books_csv, ExportSummary, CSV_HEADER};
