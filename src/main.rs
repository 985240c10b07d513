use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::audit::AuditLogger;
use expense_tracker::cli::{
    handle_budget_command, handle_categories_command, handle_expense_command,
    handle_history_command, handle_summary_command, BudgetCommands, ExpenseCommands,
};
use expense_tracker::clock::SystemClock;
use expense_tracker::config::{paths::DATA_DIR_ENV, Settings, TrackerPaths};
use expense_tracker::services::ExpenseStore;
use expense_tracker::storage::FileBackend;

/// Environment variable holding the log filter, e.g. `debug`
const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal-based personal expense and budget tracker",
    long_about = "Record income and expenses, set a monthly budget with optional \
                  per-category limits, and see how the current month is going \
                  from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// List the available categories
    Categories,

    /// Show this month's dashboard
    Summary,

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    paths.ensure_directories()?;

    let audit = AuditLogger::new(paths.audit_log());

    // Open the store
    let mut store = ExpenseStore::open(FileBackend::from_paths(&paths), SystemClock);
    if settings.audit_enabled {
        store = store.with_audit(audit.clone());
    }

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Categories) => {
            handle_categories_command(&store, &settings)?;
        }
        Some(Commands::Summary) | None => {
            handle_summary_command(&store, &settings)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&audit, limit)?;
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data file:      {}", paths.state_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {:?}", settings.currency_symbol);
            println!("  Recent entries:    {}", settings.recent_count);
            println!("  Top categories:    {}", settings.top_category_count);
            println!("  Audit log enabled: {}", settings.audit_enabled);
            println!();
            println!("Set {} to use another base directory.", DATA_DIR_ENV);
            println!("Set {} to change log verbosity (default: warn).", LOG_ENV);
        }
    }

    Ok(())
}
