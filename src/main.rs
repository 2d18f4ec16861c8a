use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use family_budget::audit::AuditLogger;
use family_budget::cli::{
    handle_audit_command, handle_entry_command, handle_export_command, handle_month_command,
    handle_year_command, AuditArgs, EntryCommands, ExportCommands, MonthCommands, YearCommands,
};
use family_budget::config::{BudgetPaths, Settings};
use family_budget::display::{format_entry_table, format_month_summary};
use family_budget::features::{AppAction, AppState, Feature, Screen};
use family_budget::services::{BudgetClient, RolloverPolicy, SystemClock};
use family_budget::storage::{EntrySort, Storage};

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "FAMILY_BUDGET_LOG";

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Household budget ledger organized by year and month",
    long_about = "Tracks income, expenses and savings month by month. Each new month \
                  starts from the previous month's ending balance."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Year management commands
    #[command(subcommand)]
    Year(YearCommands),

    /// Month commands
    #[command(subcommand)]
    Month(MonthCommands),

    /// Entry commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit records
    Audit(AuditArgs),

    /// Initialize the data directory and settings
    Init,

    /// Show or change configuration
    Config {
        /// Rollover policy: bootstrap_only or all_paths
        #[arg(long)]
        rollover: Option<RolloverPolicy>,
        /// Currency symbol for printed amounts
        #[arg(long)]
        currency: Option<String>,
        /// Default entry order: date-desc, date-asc, amount-desc, amount-asc
        #[arg(long)]
        sort: Option<EntrySort>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Init) => {
            println!("Initializing family-budget at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            Storage::open(paths.clone())?.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Run 'budget month show' to open the current month.");
            return Ok(());
        }
        Some(Commands::Config {
            rollover,
            currency,
            sort,
        }) => {
            let changed = rollover.is_some() || currency.is_some() || sort.is_some();
            if let Some(policy) = rollover {
                settings.rollover_policy = policy;
            }
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
            }
            if let Some(sort) = sort {
                settings.default_entry_sort = sort;
            }
            if changed {
                settings.save(&paths)?;
            }

            println!("family-budget configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Entry sort:      {}", settings.default_entry_sort);
            println!("  Rollover policy: {}", settings.rollover_policy);
            return Ok(());
        }
        Some(Commands::Audit(args)) => {
            handle_audit_command(&AuditLogger::new(paths.audit_log()), args)?;
            return Ok(());
        }
        other => other,
    };

    let storage = Storage::open(paths.clone())?;
    let client = BudgetClient::new(storage, SystemClock)
        .with_policy(settings.rollover_policy)
        .with_audit(AuditLogger::new(paths.audit_log()));

    match command {
        Some(Commands::Year(cmd)) => handle_year_command(&client, &settings, cmd).await?,
        Some(Commands::Month(cmd)) => handle_month_command(&client, &settings, cmd).await?,
        Some(Commands::Entry(cmd)) => handle_entry_command(&client, &settings, cmd).await?,
        Some(Commands::Export(cmd)) => {
            handle_export_command(&client, &settings, &paths, cmd).await?
        }
        Some(Commands::Init | Commands::Config { .. } | Commands::Audit(_)) => {}
        None => {
            let mut app = AppState::default();
            app.send(AppAction::AppStarted, &client).await;

            if let Some(message) = &app.error_message {
                anyhow::bail!("Failed to open the current month: {}", message);
            }
            if let Some(Screen::MonthDetail(detail)) = app.top() {
                if let Some(summary) = &detail.summary {
                    println!("{}", format_month_summary(summary, &settings));
                }
                println!("{}", format_entry_table(&detail.entries, &settings));
            }
            println!();
            println!("Run 'budget --help' for usage information.");
        }
    }

    Ok(())
}
