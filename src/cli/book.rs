//! Book CLI commands
//!
//! Implements CLI commands for catalog management and CSV exchange.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_book_lines, format_book_table};
use crate::error::LibraryResult;
use crate::export::export_catalog_csv;
use crate::models::NewBook;
use crate::services::ImportService;
use crate::storage::Catalog;

/// Book subcommands
#[derive(Subcommand)]
pub enum BookCommands {
    /// Add a new book
    Add {
        /// Book title
        title: String,
        /// Author name
        author: String,
        /// Year of publication
        year: i32,
        /// Price (e.g., "39.90")
        #[arg(value_parser = parse_price)]
        price: f64,
    },

    /// List all books
    List {
        /// One line per book instead of a table
        #[arg(short, long)]
        plain: bool,
    },

    /// Set the price of every book with this exact title
    #[command(name = "update-price")]
    UpdatePrice {
        /// Exact title (case-sensitive)
        title: String,
        /// New price
        #[arg(value_parser = parse_price)]
        price: f64,
    },

    /// Delete every book with this exact title
    Delete {
        /// Exact title (case-sensitive)
        title: String,
    },

    /// List books by an author (exact match)
    #[command(name = "find-author")]
    FindAuthor {
        /// Author name
        author: String,
    },

    /// Export the catalog to CSV
    Export,

    /// Import books from CSV
    Import {
        /// CSV file (defaults to the export file)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Parse a price argument, rejecting NaN and infinities
fn parse_price(value: &str) -> Result<f64, String> {
    let price: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if price.is_finite() {
        Ok(price)
    } else {
        Err(format!("'{}' is not a finite price", value))
    }
}

/// Handle a book command
pub fn handle_book_command(
    catalog: &Catalog,
    settings: &Settings,
    cmd: BookCommands,
) -> LibraryResult<()> {
    match cmd {
        BookCommands::Add {
            title,
            author,
            year,
            price,
        } => {
            let book = catalog.add(&NewBook::new(title, author, year, price))?;
            println!("Added book: {}", book.title);
            println!("  ID: {}", book.id);
        }

        BookCommands::List { plain } => {
            let books = catalog.list()?;
            if plain {
                print!("{}", format_book_lines(&books));
            } else {
                print!("{}", format_book_table(&books, &settings.currency_symbol));
            }
        }

        BookCommands::UpdatePrice { title, price } => {
            let matched = catalog.update_price(&title, price)?;
            if matched == 0 {
                println!("No book titled '{}'; nothing updated.", title);
            } else {
                println!("Updated price of {} book(s) titled '{}'.", matched, title);
            }
        }

        BookCommands::Delete { title } => {
            let removed = catalog.delete(&title)?;
            if removed == 0 {
                println!("No book titled '{}'; nothing deleted.", title);
            } else {
                println!("Deleted {} book(s) titled '{}'.", removed, title);
            }
        }

        BookCommands::FindAuthor { author } => {
            let books = catalog.find_by_author(&author)?;
            if books.is_empty() {
                println!("No books found for author '{}'.", author);
            } else {
                print!("{}", format_book_table(&books, &settings.currency_symbol));
            }
        }

        BookCommands::Export => {
            let summary = export_catalog_csv(catalog)?;
            println!(
                "Exported {} book(s) to {}",
                summary.book_count,
                summary.path.display()
            );
        }

        BookCommands::Import { file } => {
            let service = ImportService::new(catalog);
            let result = match file {
                Some(path) => service.import_file(&path)?,
                None => service.import_default_file()?,
            };
            println!("Imported {} book(s).", result.count());
        }
    }

    Ok(())
}
