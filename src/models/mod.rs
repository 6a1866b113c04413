//! Core data models for Livraria
//!
//! The catalog has a single persisted entity, the book.

pub mod book;

pub use book::{Book, BookId, NewBook};
