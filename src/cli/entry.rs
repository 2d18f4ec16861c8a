//! Entry CLI commands

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_entry_details, format_entry_table};
use crate::error::{BudgetError, BudgetResult};
use crate::features::{
    AddEntryAction, AddEntryState, Feature, MonthDetailAction, MonthDetailState,
};
use crate::models::{EntryKind, Money, MonthPeriod};
use crate::services::{BudgetClient, Clock};
use crate::storage::{BudgetStore, EntrySort};

use super::{check, resolve_month, to_offsets};

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Add an income, expense or saving entry
    Add {
        /// What the entry is for
        title: String,
        /// Amount, e.g. "120.50" (the sign is ignored)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// income, expense or saving
        #[arg(short, long, default_value = "expense")]
        kind: EntryKind,
        /// Month as YYYY-MM (default: the date's month, else the current month)
        #[arg(short, long)]
        month: Option<MonthPeriod>,
        /// Entry date (YYYY-MM-DD, default: now)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
        /// Mark the entry as carried over
        #[arg(long)]
        carryover: bool,
    },
    /// List a month's entries
    List {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<MonthPeriod>,
        /// Only show entries of this kind
        #[arg(short, long)]
        kind: Option<EntryKind>,
        /// Entry order: date-desc, date-asc, amount-desc, amount-asc
        #[arg(short, long)]
        sort: Option<EntrySort>,
    },
    /// Delete entries by their position in `entry list`
    Delete {
        /// Positions as shown by `entry list` with the same month and sort
        #[arg(required = true)]
        positions: Vec<usize>,
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<MonthPeriod>,
        /// Entry order the positions refer to
        #[arg(short, long)]
        sort: Option<EntrySort>,
    },
}

fn parse_date(input: &str) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", input))
    })
}

/// Handle an entry command
pub async fn handle_entry_command<S: BudgetStore>(
    client: &BudgetClient<S>,
    settings: &Settings,
    cmd: EntryCommands,
) -> BudgetResult<()> {
    match cmd {
        EntryCommands::Add {
            title,
            amount,
            kind,
            month,
            date,
            note,
            carryover,
        } => {
            let amount = Money::parse(&amount).map_err(|e| {
                BudgetError::Validation(format!(
                    "Invalid amount '{}'. Use a format like '120.50'. Error: {}",
                    amount, e
                ))
            })?;
            let date = date.as_deref().map(parse_date).transpose()?;
            let period = month.or_else(|| date.map(MonthPeriod::from_date));
            let target = resolve_month(client, period).await?;

            let mut form = AddEntryState::new(target.id, client.clock().now());
            let mut actions = vec![
                AddEntryAction::SetTitle(title),
                AddEntryAction::SetAmount(amount),
                AddEntryAction::SetKind(kind),
                AddEntryAction::SetCarryover(carryover),
            ];
            if let Some(date) = date {
                actions.push(AddEntryAction::SetDate(
                    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
                ));
            }
            if let Some(note) = note {
                actions.push(AddEntryAction::SetNote(note));
            }
            actions.push(AddEntryAction::SaveTapped);

            for action in actions {
                form.send(action, client).await;
            }
            check(&form.error_message)?;

            if let Some(entry) = &form.saved {
                println!("Added entry");
                print!("{}", format_entry_details(entry, settings));
            }
        }

        EntryCommands::List { month, kind, sort } => {
            let target = resolve_month(client, month).await?;
            let sort = sort.unwrap_or(settings.default_entry_sort);
            let entries = match kind {
                Some(kind) => client.entries_of_kind(target.id, kind, sort).await?,
                None => client.entries_for_month(target.id, sort).await?,
            };
            println!("{}", format_entry_table(&entries, settings));
        }

        EntryCommands::Delete {
            positions,
            month,
            sort,
        } => {
            let offsets = to_offsets(&positions)?;
            let target = resolve_month(client, month).await?;

            let mut detail =
                MonthDetailState::sorted(target.id, sort.unwrap_or(settings.default_entry_sort));
            detail.send(MonthDetailAction::Load, client).await;
            check(&detail.error_message)?;

            let before = detail.entries.len();
            detail.send(MonthDetailAction::Delete(offsets), client).await;
            check(&detail.error_message)?;
            println!("Deleted {} entry(s)", before - detail.entries.len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-03-09").unwrap(), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert!(parse_date("09/03/2025").unwrap_err().is_validation());
    }
}
