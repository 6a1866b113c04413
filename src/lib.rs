//! Livraria - personal book catalog backed by SQLite
//!
//! This library provides the core functionality for the Livraria catalog.
//! Books live in a single SQLite file; every change to it is preceded by a
//! timestamped snapshot, and the catalog can be exchanged as CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data root, file paths and user settings
//! - `error`: Custom error types
//! - `models`: The book record
//! - `storage`: SQLite storage layer and the `Catalog` handle
//! - `backup`: Snapshots, retention and restore
//! - `audit`: Audit logging of mutations
//! - `export`: CSV export
//! - `services`: CSV import
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use livraria::config::{LibraryPaths, Settings};
//! use livraria::models::NewBook;
//! use livraria::storage::Catalog;
//!
//! let paths = LibraryPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let catalog = Catalog::open(&paths, &settings)?;
//! catalog.add(&NewBook::new("Dom Casmurro", "Machado de Assis", 1899, 29.90))?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::LibraryError;
