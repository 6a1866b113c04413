//! Configuration module for Livraria
//!
//! This module provides configuration management including:
//! - Data root and file path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LibraryPaths;
pub use settings::Settings;
