//! Audit log records
//!
//! Defines the operation types and the entry format written to the audit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Book;

/// Kind of catalog mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Book was added
    Create,
    /// Price of matching books was changed
    Update,
    /// Matching books were removed
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// One catalog mutation with the rows it touched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Time of the mutation, UTC
    pub timestamp: DateTime<Utc>,

    /// Kind of mutation
    pub operation: Operation,

    /// What the operation targeted: a book id for creates, a title otherwise
    pub subject: String,

    /// Number of rows the statement changed
    pub rows_affected: usize,

    /// Rows as they were before the operation (for updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Rows as they are after the operation (for creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable change summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    /// Entry for a newly added book
    pub fn create(book: &Book) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            subject: format!("book {}", book.id),
            rows_affected: 1,
            before: None,
            after: serde_json::to_value(book).ok(),
            summary: Some(format!("'{}' by {}", book.title, book.author)),
        }
    }

    /// Entry for a price update over every book titled `title`
    pub fn update_price(title: &str, new_price: f64, before: &[Book]) -> Self {
        let after: Vec<Book> = before
            .iter()
            .cloned()
            .map(|mut book| {
                book.price = new_price;
                book
            })
            .collect();
        let old_prices: Vec<String> = before.iter().map(|b| b.price.to_string()).collect();

        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            subject: title.to_string(),
            rows_affected: before.len(),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(&after).ok(),
            summary: Some(format!("price: [{}] -> {}", old_prices.join(", "), new_price)),
        }
    }

    /// Entry for deleting every book titled `title`
    pub fn delete(title: &str, before: &[Book]) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            subject: title.to_string(),
            rows_affected: before.len(),
            before: serde_json::to_value(before).ok(),
            after: None,
            summary: None,
        }
    }

    /// One-line rendering for terminal output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} ({} row(s))",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.subject,
            self.rows_affected
        );

        if let Some(summary) = &self.summary {
            output.push_str(&format!("\n  Changes: {}", summary));
        }

        output
    }
}
