//! CSV export of entries
//!
//! One row per entry under the header `Title,Date,Type,Amount,Note,IsCarryover`.
//! Dates are ISO-8601 in UTC, amounts carry two decimals.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Entry, MonthId};
use crate::services::BudgetClient;
use crate::storage::{BudgetStore, EntrySort};

pub const CSV_HEADER: [&str; 6] = ["Title", "Date", "Type", "Amount", "Note", "IsCarryover"];

/// Write entries as CSV, in the order given
pub fn export_entries_csv<W: Write>(entries: &[Entry], writer: W) -> BudgetResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for entry in entries {
        let date = entry.date.to_rfc3339_opts(SecondsFormat::Secs, true);
        let amount = entry.amount.magnitude().to_string();
        csv_writer.write_record([
            entry.title.as_str(),
            date.as_str(),
            entry.kind.as_str(),
            amount.as_str(),
            entry.note.as_str(),
            if entry.is_carryover { "true" } else { "false" },
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

/// Export one month's entries, sorted as requested
pub async fn export_month_csv<S: BudgetStore, W: Write>(
    client: &BudgetClient<S>,
    month_id: MonthId,
    sort: EntrySort,
    writer: W,
) -> BudgetResult<usize> {
    let month = client.fetch_month_by_id(month_id).await?;
    let entries = client.entries_for_month(month.id, sort).await?;
    export_entries_csv(&entries, writer)?;
    Ok(entries.len())
}

/// `BudgetExport_<unix seconds>.csv` inside `dir`
pub fn default_export_file(dir: &Path, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!("BudgetExport_{}.csv", now.timestamp()))
}
