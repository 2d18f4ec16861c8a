//! Year CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_month_grid, format_year_list};
use crate::error::{BudgetError, BudgetResult};
use crate::features::{Feature, MonthGridAction, MonthGridState, YearListAction, YearListState};
use crate::services::BudgetClient;
use crate::storage::BudgetStore;

use super::check;

/// Year subcommands
#[derive(Subcommand)]
pub enum YearCommands {
    /// List all years
    List,
    /// Add a year (no-op if it already exists)
    Add {
        /// Calendar year, e.g. 2025
        year: i32,
    },
    /// Show the twelve-month overview of a year
    Show {
        /// Calendar year, e.g. 2025
        year: i32,
    },
    /// Delete years together with their months and entries
    Delete {
        /// Calendar years to delete
        #[arg(required = true)]
        years: Vec<i32>,
    },
}

/// Handle a year command
pub async fn handle_year_command<S: BudgetStore>(
    client: &BudgetClient<S>,
    settings: &Settings,
    cmd: YearCommands,
) -> BudgetResult<()> {
    let mut list = YearListState::default();

    match cmd {
        YearCommands::List => {
            list.send(YearListAction::Load, client).await;
            check(&list.error_message)?;
            println!("{}", format_year_list(&list.years));
        }

        YearCommands::Add { year } => {
            list.send(YearListAction::AddYear(year), client).await;
            check(&list.error_message)?;
            println!("Year {} is ready ({} total)", year, list.years.len());
        }

        YearCommands::Show { year } => {
            list.send(YearListAction::Load, client).await;
            check(&list.error_message)?;

            let found = list
                .years
                .iter()
                .find(|y| y.year == year)
                .ok_or_else(|| BudgetError::year_not_found(year.to_string()))?;

            let mut grid = MonthGridState::new(found.id);
            grid.send(MonthGridAction::Load, client).await;
            check(&grid.error_message)?;
            println!("{}", format_month_grid(&grid.months, settings));
        }

        YearCommands::Delete { years } => {
            list.send(YearListAction::Load, client).await;
            check(&list.error_message)?;

            let mut offsets = Vec::new();
            for value in &years {
                match list.years.iter().position(|y| y.year == *value) {
                    Some(offset) => offsets.push(offset),
                    None => println!("Year {} not found, skipped", value),
                }
            }

            let before = list.years.len();
            list.send(YearListAction::Delete(offsets), client).await;
            check(&list.error_message)?;
            println!("Deleted {} year(s)", before - list.years.len());
        }
    }

    Ok(())
}
