//! Budget year model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::YearId;
use crate::error::BudgetError;

/// Container for up to twelve months; at most one per year value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Year {
    pub id: YearId,

    /// Calendar year, 1-9999
    pub year: i32,

    pub created_at: DateTime<Utc>,
}

impl Year {
    pub const VALID_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

    pub fn new(year: i32) -> Self {
        Self {
            id: YearId::new(),
            year,
            created_at: Utc::now(),
        }
    }

    /// Validate a year value before creating a record for it
    pub fn validate_value(year: i32) -> Result<(), BudgetError> {
        if Self::VALID_RANGE.contains(&year) {
            Ok(())
        } else {
            Err(BudgetError::Validation(format!(
                "Year must be between {} and {}, got {}",
                Self::VALID_RANGE.start(),
                Self::VALID_RANGE.end(),
                year
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_year() {
        let year = Year::new(2025);
        assert_eq!(year.year, 2025);
        assert!(!year.id.as_uuid().is_nil());
    }

    #[test]
    fn test_validate_value() {
        assert!(Year::validate_value(2025).is_ok());
        assert!(Year::validate_value(0).unwrap_err().is_validation());
        assert!(Year::validate_value(9999).is_ok());

        let err = Year::validate_value(10_000).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Year must be between 1 and 9999, got 10000"
        );
    }
}
