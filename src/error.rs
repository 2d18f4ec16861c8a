//! Custom error types for the budget ledger
//!
//! This module defines the error hierarchy for the library using thiserror.
//! The binary wraps these in anyhow at the top level.

use thiserror::Error;

/// The main error type for budget operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced year, month or entry no longer exists
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The underlying store failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A failure already reported as text by a screen state
    #[error("{0}")]
    Operation(String),
}

impl BudgetError {
    /// Create a "not found" error for years
    pub fn year_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Year",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for months
    pub fn month_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Month",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from the store
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<crate::models::PeriodParseError> for BudgetError {
    fn from(err: crate::models::PeriodParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::MoneyParseError> for BudgetError {
    fn from(err: crate::models::MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<csv::Error> for BudgetError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for budget operations
pub type BudgetResult<T> = Result<T, BudgetError>;
