//! JSON export of the full dataset

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Entry, Month, Year};
use crate::services::{BudgetClient, BudgetSnapshot, Clock};
use crate::storage::BudgetStore;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub years: Vec<Year>,
    pub months: Vec<Month>,
    pub entries: Vec<Entry>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub year_count: usize,
    pub month_count: usize,
    pub entry_count: usize,

    /// Date of the earliest entry
    pub earliest_entry: Option<String>,

    /// Date of the latest entry
    pub latest_entry: Option<String>,
}

impl FullExport {
    pub fn from_snapshot(snapshot: BudgetSnapshot, exported_at: DateTime<Utc>) -> Self {
        let BudgetSnapshot {
            years,
            months,
            entries,
        } = snapshot;

        let earliest_entry = entries.iter().map(|e| e.date).min().map(|d| d.to_rfc3339());
        let latest_entry = entries.iter().map(|e| e.date).max().map(|d| d.to_rfc3339());

        let metadata = ExportMetadata {
            year_count: years.len(),
            month_count: months.len(),
            entry_count: entries.len(),
            earliest_entry,
            latest_entry,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            years,
            months,
            entries,
            metadata,
        }
    }

    /// Check the schema version and that every month and entry has an owner
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let year_ids: std::collections::HashSet<_> = self.years.iter().map(|y| y.id).collect();
        let month_ids: std::collections::HashSet<_> = self.months.iter().map(|m| m.id).collect();

        for month in &self.months {
            if !year_ids.contains(&month.year_id) {
                return Err(format!(
                    "Month {} references unknown year {}",
                    month.id, month.year_id
                ));
            }
        }

        for entry in &self.entries {
            if !month_ids.contains(&entry.month_id) {
                return Err(format!(
                    "Entry {} references unknown month {}",
                    entry.id, entry.month_id
                ));
            }
        }

        Ok(())
    }
}

/// Export everything in the store to JSON
pub async fn export_full_json<S: BudgetStore, W: Write>(
    client: &BudgetClient<S>,
    writer: W,
    pretty: bool,
) -> BudgetResult<FullExport> {
    let snapshot = client.snapshot().await?;
    let export = FullExport::from_snapshot(snapshot, client.clock().now());

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, Money, NewEntry, YearId};
    use crate::services::FixedClock;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_full_export() {
        let client = BudgetClient::new(Storage::in_memory(), FixedClock::on(2025, 2, 3));
        let month = client.bootstrap_current_month().await.unwrap();
        client
            .add_entry(month.id, NewEntry::new("Salary", Money::from_major(3000), EntryKind::Income))
            .await
            .unwrap();

        let mut out = Vec::new();
        let export = export_full_json(&client, &mut out, true).await.unwrap();

        assert_eq!(export.metadata.year_count, 1);
        assert_eq!(export.metadata.month_count, 1);
        assert_eq!(export.metadata.entry_count, 1);
        assert!(export.validate().is_ok());

        let parsed: FullExport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.entries[0].title, "Salary");
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
    }

    #[test]
    fn test_validate_detects_orphan_month() {
        let snapshot = BudgetSnapshot {
            years: Vec::new(),
            months: vec![Month::new(YearId::new(), 1, Money::zero())],
            entries: Vec::new(),
        };
        let export = FullExport::from_snapshot(snapshot, Utc::now());
        assert!(export.validate().unwrap_err().contains("unknown year"));
    }
}
