//! Audit logging system for Livraria
//!
//! Records every add, price update and delete in an append-only audit log,
//! with the affected rows before and after the change.
//!
//! - `AuditEntry`: a single log entry with timestamp, operation, subject and
//!   optional before/after values.
//! - `AuditLogger`: appends entries to the log file as line-delimited JSON
//!   (JSONL).

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
