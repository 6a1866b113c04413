//! Audit CLI command
//!
//! Prints the most recent entries of the catalog's audit log.

use clap::Args;

use crate::error::LibraryResult;
use crate::storage::Catalog;

/// Arguments for `livraria audit`
#[derive(Args)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Handle the audit command
pub fn handle_audit_command(catalog: &Catalog, args: AuditArgs) -> LibraryResult<()> {
    let audit = catalog.audit();
    if !audit.exists() {
        println!("No audit entries yet.");
        return Ok(());
    }

    let entries = audit.read_recent(args.limit)?;
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    println!();
    println!(
        "Showing {} of {} entries",
        entries.len(),
        audit.entry_count()?
    );

    Ok(())
}
