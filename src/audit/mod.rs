//! Audit logging
//!
//! Every year, month and entry that is created or deleted is recorded in an
//! append-only JSON-lines file next to the data directory.
//!
//! ```rust,ignore
//! use family_budget::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(EntityType::Year, year.id.full(), Some("2025".into()), &year))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
