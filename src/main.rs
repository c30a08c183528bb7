use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_add, handle_budget_command, handle_month, handle_remove, AddArgs, BudgetCommands,
};
use expense_tracker::config::{AppPaths, Settings};
use expense_tracker::display::format_log_entries;
use expense_tracker::logging::{read_recent, Logger};
use expense_tracker::models::ExpenseId;
use expense_tracker::services::LedgerService;
use expense_tracker::LedgerResult;
use expense_tracker::storage::SqliteStore;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Track expenses against monthly budgets",
    long_about = "Records expenses in a local SQLite database and shows, for any \
                  month, what was spent and how much of the budget is left."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense
    Add(AddArgs),

    /// Delete an expense by id
    #[command(alias = "rm")]
    Remove {
        /// Expense id as shown by `expense month`
        id: ExpenseId,
    },

    /// Show a month's expenses, budget and money left
    Month {
        /// YYYY-MM, "current", "prev" or "next" (defaults to current)
        period: Option<String>,
        /// Print the month as JSON
        #[arg(long)]
        json: bool,
    },

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show recent log entries
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AppPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Config => {
            print_config(&paths, &settings);
            Ok(())
        }
        Commands::Log { count } => {
            let entries = read_recent(paths.log_file(&settings), count)?;
            print!("{}", format_log_entries(&entries));
            Ok(())
        }
        command => run_with_ledger(&paths, &settings, command),
    }
}

/// Open logger then store, run the command, close store then logger
fn run_with_ledger(paths: &AppPaths, settings: &Settings, command: Commands) -> Result<()> {
    paths.ensure_directories()?;
    if !paths.is_initialized() {
        settings.save(paths)?;
    }

    let logger = Logger::open(paths.log_file(settings))?;
    let db_path = paths.database_file(settings);
    let store = match SqliteStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            logger.error("main", format!("Could not open {}: {}", db_path.display(), e));
            logger.close()?;
            return Err(e).with_context(|| format!("Failed to open {}", db_path.display()));
        }
    };

    let result = {
        let service = LedgerService::new(&store, &logger);
        match command {
            Commands::Add(args) => handle_add(&service, args),
            Commands::Remove { id } => handle_remove(&service, id),
            Commands::Month { period, json } => {
                handle_month(&service, settings, period.as_deref(), json)
            }
            Commands::Budget(cmd) => handle_budget_command(&service, cmd),
            Commands::Log { .. } | Commands::Config => Ok(()),
        }
    };

    // the logger is closed even when the store fails to close
    let store_closed = store.close();
    let logger_closed = logger.close();

    first_error([result, store_closed, logger_closed])
}

/// Report the earliest failure from the command and shutdown steps
fn first_error(outcomes: [LedgerResult<()>; 3]) -> Result<()> {
    for outcome in outcomes {
        outcome?;
    }
    Ok(())
}

fn print_config(paths: &AppPaths, settings: &Settings) {
    println!("Expense Tracker Configuration");
    println!("=============================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Database:       {}", paths.database_file(settings).display());
    println!("Log file:       {}", paths.log_file(settings).display());
    println!();
    println!("Settings:");
    println!("  Schema version:  {}", settings.schema_version);
    println!(
        "  Currency symbol: {}",
        if settings.currency_symbol.is_empty() {
            "(none)"
        } else {
            settings.currency_symbol.as_str()
        }
    );
    if !paths.is_initialized() {
        println!();
        println!("Using defaults; the settings file is written on first use.");
    }
}
