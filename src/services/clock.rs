//! Wall-clock source
//!
//! Month bootstrap reads "today" through this trait so tests can pin the date.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::models::MonthPeriod;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// The calendar month containing today
    fn current_period(&self) -> MonthPeriod {
        MonthPeriod::from_date(self.today())
    }
}

/// The system clock, using the local time zone for calendar dates
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stopped at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Noon UTC on the given day
    ///
    /// # Panics
    ///
    /// Panics if the date does not exist.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
                .single()
                .unwrap_or_else(|| panic!("invalid date {}-{}-{}", year, month, day)),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
