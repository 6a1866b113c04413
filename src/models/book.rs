//! Book model
//!
//! A catalog row as stored in the `livros` table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate key assigned by the database on insert
pub type BookId = i64;

/// A stored book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, never reused after deletion
    pub id: BookId,

    /// Book title
    pub title: String,

    /// Author name
    pub author: String,

    /// Year of publication
    pub publication_year: i32,

    /// Price, non-negative by convention
    pub price: f64,
}

/// Field values for a book that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub price: f64,
}

impl NewBook {
    /// Create the field set for a new book
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        price: f64,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
            price,
        }
    }

    /// Attach the id the store assigned
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            price: self.price,
        }
    }
}

impl Book {
    /// The insertable fields of this book (without the id)
    pub fn fields(&self) -> NewBook {
        NewBook::new(
            self.title.clone(),
            self.author.clone(),
            self.publication_year,
            self.price,
        )
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Título: {}, Autor: {}, Ano: {}, Preço: {}",
            self.id, self.title, self.author, self.publication_year, self.price
        )
    }
}
