use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use livraria::cli::{handle_audit_command, handle_backup_command, handle_book_command, run_menu};
use livraria::config::{paths::LibraryPaths, settings::Settings};
use livraria::storage::Catalog;

#[derive(Parser)]
#[command(
    name = "livraria",
    version,
    about = "Personal book catalog backed by SQLite",
    long_about = "Livraria keeps a catalog of books in a local SQLite file. \
                  Every change is preceded by a timestamped backup, and the \
                  catalog can be exported to and imported from CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (default)
    Menu,

    #[command(flatten)]
    Book(livraria::cli::BookCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(livraria::cli::BackupCommands),

    /// Show recent entries of the audit log
    Audit(livraria::cli::AuditArgs),

    /// Show current configuration and paths
    Config {
        /// Write the settings file with the current values
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = LibraryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let catalog = Catalog::open(&paths, &settings)?;
            let stdin = std::io::stdin();
            run_menu(&catalog, stdin.lock(), std::io::stdout())?;
        }
        Commands::Book(cmd) => {
            let catalog = Catalog::open(&paths, &settings)?;
            handle_book_command(&catalog, &settings, cmd)?;
        }
        Commands::Audit(args) => {
            let catalog = Catalog::open(&paths, &settings)?;
            handle_audit_command(&catalog, args)?;
        }
        Commands::Backup(cmd) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Commands::Config { save } => {
            println!("Livraria Configuration");
            println!("======================");
            println!("Data root:        {}", paths.base_dir().display());
            println!("Database:         {}", paths.database_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Export file:      {}", paths.export_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Backups kept:    {}", settings.backup_retention.keep_count);
            println!("  Currency symbol: {}", settings.currency_symbol);

            if save {
                settings.save(&paths)?;
                println!();
                println!("Settings saved to {}", paths.settings_file().display());
            }
        }
    }

    Ok(())
}
