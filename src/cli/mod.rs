//! CLI command handlers
//!
//! Bridges clap argument parsing with the client and the screen states.
//! Months are addressed as `YYYY-MM`; when omitted, the current month is
//! used (and bootstrapped if it does not exist yet).

pub mod audit;
pub mod entry;
pub mod export;
pub mod month;
pub mod year;

pub use audit::{handle_audit_command, AuditArgs};
pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use month::{handle_month_command, MonthCommands};
pub use year::{handle_year_command, YearCommands};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Month, MonthPeriod};
use crate::services::BudgetClient;
use crate::storage::BudgetStore;

/// Fail the command if the screen recorded an error
pub(crate) fn check(error_message: &Option<String>) -> BudgetResult<()> {
    match error_message {
        Some(message) => Err(BudgetError::Operation(message.clone())),
        None => Ok(()),
    }
}

/// The month a command addresses
pub(crate) async fn resolve_month<S: BudgetStore>(
    client: &BudgetClient<S>,
    period: Option<MonthPeriod>,
) -> BudgetResult<Month> {
    match period {
        Some(period) => client.month_for_period(period).await,
        None => client.bootstrap_current_month().await,
    }
}

/// Convert 1-based list positions to offsets
pub(crate) fn to_offsets(positions: &[usize]) -> BudgetResult<Vec<usize>> {
    positions
        .iter()
        .map(|&p| {
            p.checked_sub(1)
                .ok_or_else(|| BudgetError::Validation("Positions start at 1".into()))
        })
        .collect()
}
