//! Append-only audit log
//!
//! One JSON record per line. A batch of records from one committed operation
//! is appended with a single write.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{BudgetError, BudgetResult};

use super::entry::{AuditEntry, EntityType};

pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log(&self, entry: &AuditEntry) -> BudgetResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append the records of one operation
    pub fn log_batch(&self, entries: &[AuditEntry]) -> BudgetResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut lines = String::new();
        for entry in entries {
            lines.push_str(&serde_json::to_string(entry)?);
            lines.push('\n');
            tracing::debug!(
                operation = %entry.operation,
                entity = %entry.entity_type,
                id = %entry.entity_id,
                label = entry.entity_name.as_deref().unwrap_or(""),
                "audit"
            );
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| self.io_error("open", e))?;
        file.write_all(lines.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| self.io_error("append to", e))
    }

    /// All records, oldest first
    pub fn read_all(&self) -> BudgetResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error("read", e)),
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| {
                    BudgetError::Json(format!(
                        "Failed to parse audit record at line {}: {}",
                        index + 1,
                        e
                    ))
                })
            })
            .collect()
    }

    /// The most recent `count` records, oldest first, optionally limited to
    /// one kind of record
    pub fn read_recent(
        &self,
        count: usize,
        entity: Option<EntityType>,
    ) -> BudgetResult<Vec<AuditEntry>> {
        let mut records = self.read_all()?;
        if let Some(entity) = entity {
            records.retain(|r| r.entity_type == entity);
        }
        let start = records.len().saturating_sub(count);
        Ok(records.split_off(start))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    fn io_error(&self, action: &str, err: io::Error) -> BudgetError {
        BudgetError::Io(format!(
            "Failed to {} audit log {}: {}",
            action,
            self.log_path.display(),
            err
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        let entry = AuditEntry::create(EntityType::Year, "yr-1", Some("2025".into()), &json!({}));

        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Year);
    }

    #[test]
    fn test_batch_appends_one_line_per_record() {
        let (logger, _temp) = create_test_logger();
        let batch = vec![
            AuditEntry::create(EntityType::Year, "yr-1", Some("2025".into()), &json!({})),
            AuditEntry::create(EntityType::Month, "mon-1", Some("May 2025".into()), &json!({})),
        ];
        logger.log_batch(&batch).unwrap();
        logger.log_batch(&[]).unwrap();

        let raw = fs::read_to_string(logger.path()).unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.ends_with('\n'));
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        let entries: Vec<_> = (0..6)
            .map(|i| AuditEntry::create(EntityType::Entry, format!("ent-{}", i), None, &json!({})))
            .collect();
        logger.log_batch(&entries).unwrap();

        let recent = logger.read_recent(2, None).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].entity_id, "ent-4");
        assert_eq!(recent[1].entity_id, "ent-5");
    }

    #[test]
    fn test_read_recent_filters_by_entity() {
        let (logger, _temp) = create_test_logger();
        logger
            .log_batch(&[
                AuditEntry::create(EntityType::Year, "yr-1", None, &json!({})),
                AuditEntry::create(EntityType::Month, "mon-1", None, &json!({})),
                AuditEntry::create(EntityType::Month, "mon-2", None, &json!({})),
                AuditEntry::create(EntityType::Entry, "ent-1", None, &json!({})),
            ])
            .unwrap();

        let months = logger.read_recent(10, Some(EntityType::Month)).unwrap();
        let ids: Vec<&str> = months.iter().map(|m| m.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["mon-1", "mon-2"]);
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(10, None).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let (logger, _temp) = create_test_logger();
        logger
            .log(&AuditEntry::delete(EntityType::Month, "mon-1", None, &json!({})))
            .unwrap();
        fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .and_then(|mut f| writeln!(f, "garbage"))
            .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
