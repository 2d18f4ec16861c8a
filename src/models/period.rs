//! Calendar month addressing
//!
//! A `MonthPeriod` names one month of one year (`2025-01`) independently of
//! whether a stored Month exists for it yet.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::year::Year;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name for a month index (1-12)
pub fn month_name(index: u32) -> Option<&'static str> {
    index
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

/// One calendar month of one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Create a period, validating the month index
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::MonthOutOfRange(month));
        }
        if !Year::VALID_RANGE.contains(&year) {
            return Err(PeriodParseError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month before this one; January rolls back to December of the prior year
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Title such as "January 2025"
    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        Self::new(year, month)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodParseError {
    #[error("Invalid month format: '{0}' (expected YYYY-MM)")]
    InvalidFormat(String),

    #[error("Month index must be 1-12, got {0}")]
    MonthOutOfRange(u32),

    #[error("Year must be 1-9999, got {0}")]
    YearOutOfRange(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_wraps_year() {
        let jan = MonthPeriod::new(2025, 1).unwrap();
        assert_eq!(jan.previous(), MonthPeriod::new(2024, 12).unwrap());

        let jul = MonthPeriod::new(2025, 7).unwrap();
        assert_eq!(jul.previous(), MonthPeriod::new(2025, 6).unwrap());
    }

    #[test]
    fn test_next_wraps_year() {
        let dec = MonthPeriod::new(2024, 12).unwrap();
        assert_eq!(dec.next(), MonthPeriod::new(2025, 1).unwrap());
        assert_eq!(dec.next().previous(), dec);
    }

    #[test]
    fn test_parse_and_display() {
        let period: MonthPeriod = "2025-03".parse().unwrap();
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 3);
        assert_eq!(period.to_string(), "2025-03");
        assert_eq!(period.title(), "March 2025");
    }

    #[test]
    fn test_parse_rejects_bad_month() {
        assert_eq!(
            "2025-13".parse::<MonthPeriod>(),
            Err(PeriodParseError::MonthOutOfRange(13))
        );
        assert!(matches!(
            "march".parse::<MonthPeriod>(),
            Err(PeriodParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let period = MonthPeriod::from_date(date);
        assert_eq!(period.to_string(), "2026-10");
        assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2026, 10, 1));
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
