//! Service layer for Livraria
//!
//! Operations that combine the catalog with external files, such as
//! importing books from a CSV export.

pub mod import;

pub use import::{parse_books_csv, ImportResult, ImportService};
