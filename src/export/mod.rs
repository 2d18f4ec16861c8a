//! Data export
//!
//! - CSV: one month's entries, spreadsheet-compatible
//! - JSON: the full dataset with schema versioning

pub mod csv;
pub mod json;

pub use self::csv::{default_export_file, export_entries_csv, export_month_csv, CSV_HEADER};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
