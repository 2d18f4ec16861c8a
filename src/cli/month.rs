//! Month CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_entry_table, format_month_summary};
use crate::error::BudgetResult;
use crate::features::{Feature, MonthDetailAction, MonthDetailState};
use crate::models::MonthPeriod;
use crate::services::BudgetClient;
use crate::storage::{BudgetStore, EntrySort};

use super::{check, resolve_month};

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// Show a month's balances and entries
    Show {
        /// Month as YYYY-MM (default: current month)
        period: Option<MonthPeriod>,
        /// Entry order: date-desc, date-asc, amount-desc, amount-asc
        #[arg(short, long)]
        sort: Option<EntrySort>,
    },
    /// Delete months together with their entries
    Delete {
        /// Months as YYYY-MM
        #[arg(required = true)]
        periods: Vec<MonthPeriod>,
    },
}

/// Handle a month command
pub async fn handle_month_command<S: BudgetStore>(
    client: &BudgetClient<S>,
    settings: &Settings,
    cmd: MonthCommands,
) -> BudgetResult<()> {
    match cmd {
        MonthCommands::Show { period, sort } => {
            let month = resolve_month(client, period).await?;
            let mut detail = MonthDetailState::sorted(
                month.id,
                sort.unwrap_or(settings.default_entry_sort),
            );
            detail.send(MonthDetailAction::Load, client).await;
            check(&detail.error_message)?;

            if let Some(summary) = &detail.summary {
                println!("{}", format_month_summary(summary, settings));
            }
            println!("{}", format_entry_table(&detail.entries, settings));
        }

        MonthCommands::Delete { periods } => {
            let mut ids = Vec::new();
            for period in &periods {
                match client.find_month_for_period(*period).await? {
                    Some(month) => ids.push(month.id),
                    None => println!("{} not found, skipped", period.title()),
                }
            }

            let removed = client.delete_months(&ids).await?;
            println!("Deleted {} month(s)", removed);
        }
    }

    Ok(())
}
