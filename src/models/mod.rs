//! Core data models
//!
//! Years own months, months own entries. Balances are derived, never stored.

pub mod entry;
pub mod ids;
pub mod money;
pub mod month;
pub mod period;
pub mod year;

pub use entry::{Entry, EntryKind, NewEntry};
pub use ids::{EntryId, MonthId, YearId};
pub use money::{Money, MoneyParseError};
pub use month::{Month, MonthTotals};
pub use period::{month_name, MonthPeriod, PeriodParseError};
pub use year::Year;
