//! Balance rollover engine
//!
//! Get-or-create steps for years and months, and the computation of a new
//! month's starting balance from the month before it. Nothing here commits;
//! callers commit once per operation and audit whatever was created.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Month, MonthPeriod, MonthTotals, Money, Year};
use crate::storage::{BudgetStore, EntryQuery};

/// The ways a month record can come into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPath {
    /// Startup bootstrap of the current calendar month
    Bootstrap,
    /// Explicit `ensure_month` / period addressing
    EnsureMonth,
    /// Filling in the twelve months of a year
    MonthsForYear,
    /// `fetch_current_month`
    CurrentMonth,
}

/// Which creation paths inherit the previous month's ending balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RolloverPolicy {
    /// Only the startup bootstrap carries the balance forward; every other
    /// path starts new months at zero
    #[default]
    BootstrapOnly,
    /// Every path carries the balance forward
    AllPaths,
}

impl RolloverPolicy {
    pub fn opening_for(&self, path: CreationPath) -> Opening {
        match (self, path) {
            (_, CreationPath::Bootstrap) | (RolloverPolicy::AllPaths, _) => Opening::CarryForward,
            (RolloverPolicy::BootstrapOnly, _) => Opening::Zero,
        }
    }
}

impl fmt::Display for RolloverPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RolloverPolicy::BootstrapOnly => write!(f, "bootstrap_only"),
            RolloverPolicy::AllPaths => write!(f, "all_paths"),
        }
    }
}

impl FromStr for RolloverPolicy {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "bootstrap_only" | "bootstrap" => Ok(Self::BootstrapOnly),
            "all_paths" | "all" => Ok(Self::AllPaths),
            other => Err(BudgetError::Validation(format!(
                "Unknown rollover policy '{}'. Use bootstrap_only or all_paths",
                other
            ))),
        }
    }
}

/// How a newly created month's starting balance is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opening {
    Zero,
    /// Ending balance of the previous calendar month, or zero if it doesn't exist
    CarryForward,
}

/// Result of a get-or-create step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ensured<T> {
    pub value: T,
    pub created: bool,
}

impl<T> Ensured<T> {
    fn existing(value: T) -> Self {
        Self {
            value,
            created: false,
        }
    }

    fn created(value: T) -> Self {
        Self {
            value,
            created: true,
        }
    }
}

/// Recompute a month's totals from its current entries
pub async fn month_totals<S>(store: &S, month: &Month) -> BudgetResult<MonthTotals>
where
    S: BudgetStore + ?Sized,
{
    let entries = store.entries(&EntryQuery::for_month(month.id)).await?;
    MonthTotals::compute(month.starting_balance, &entries)
}

/// The ending balance of the month before `period`, or zero if that month
/// (or its year) was never created
pub async fn carried_balance<S>(store: &S, period: MonthPeriod) -> BudgetResult<Money>
where
    S: BudgetStore + ?Sized,
{
    let previous = period.previous();

    let Some(year) = store.year_by_value(previous.year()).await? else {
        return Ok(Money::zero());
    };
    let Some(month) = store.month_in_slot(year.id, previous.month()).await? else {
        return Ok(Money::zero());
    };

    Ok(month_totals(store, &month).await?.ending_balance)
}

/// Find the year with the given value, creating it if absent
pub async fn ensure_year<S>(store: &S, value: i32) -> BudgetResult<Ensured<Year>>
where
    S: BudgetStore + ?Sized,
{
    if let Some(year) = store.year_by_value(value).await? {
        return Ok(Ensured::existing(year));
    }

    Year::validate_value(value)?;
    let year = Year::new(value);
    store.insert_year(year.clone()).await?;
    tracing::debug!(year = value, id = %year.id, "created year");

    Ok(Ensured::created(year))
}

/// Find month `index` of `year`, creating it if absent
///
/// An existing month is returned untouched; its starting balance is never
/// recomputed.
pub async fn ensure_month<S>(
    store: &S,
    year: &Year,
    index: u32,
    opening: Opening,
) -> BudgetResult<Ensured<Month>>
where
    S: BudgetStore + ?Sized,
{
    if !(1..=12).contains(&index) {
        return Err(BudgetError::Validation(format!(
            "Month index must be 1-12, got {}",
            index
        )));
    }

    if let Some(month) = store.month_in_slot(year.id, index).await? {
        return Ok(Ensured::existing(month));
    }

    let starting_balance = match opening {
        Opening::Zero => Money::zero(),
        Opening::CarryForward => {
            carried_balance(store, MonthPeriod::new(year.year, index)?).await?
        }
    };

    let month = Month::new(year.id, index, starting_balance);
    store.insert_month(month.clone()).await?;
    tracing::debug!(
        year = year.year,
        month = index,
        starting = %starting_balance,
        "created month"
    );

    Ok(Ensured::created(month))
}
