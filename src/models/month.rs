//! Budget month model and balance aggregation
//!
//! Totals are derived from the month's entries on every read; nothing
//! computed is ever stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BudgetError;

use super::entry::{Entry, EntryKind};
use super::ids::{MonthId, YearId};
use super::money::Money;
use super::period::month_name;

/// One calendar month of a year, holding its opening balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub id: MonthId,

    /// Owning year
    pub year_id: YearId,

    /// Month index, 1-12
    pub index: u32,

    /// Balance carried in at the start of the month
    #[serde(default)]
    pub starting_balance: Money,

    pub created_at: DateTime<Utc>,
}

impl Month {
    pub fn new(year_id: YearId, index: u32, starting_balance: Money) -> Self {
        Self {
            id: MonthId::new(),
            year_id,
            index,
            starting_balance,
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        month_name(self.index).unwrap_or("Unknown")
    }
}

/// Derived balances for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthTotals {
    pub starting_balance: Money,
    pub total_income: Money,
    pub total_expense: Money,
    pub total_savings: Money,
    pub net_balance: Money,
    pub ending_balance: Money,
}

impl MonthTotals {
    /// `net = starting + income - expense - savings`; ending is the same value
    ///
    /// Fails with a validation error if any sum leaves the `i64` cent range.
    pub fn compute<'a, I>(starting_balance: Money, entries: I) -> Result<Self, BudgetError>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let overflow = || {
            BudgetError::Validation(format!(
                "Month totals exceed the representable range (starting balance {})",
                starting_balance
            ))
        };

        let mut totals = Self {
            starting_balance,
            ..Self::default()
        };

        for entry in entries {
            let sum = match entry.kind {
                EntryKind::Income => &mut totals.total_income,
                EntryKind::Expense => &mut totals.total_expense,
                EntryKind::Saving => &mut totals.total_savings,
            };
            *sum = sum
                .checked_add(entry.amount.magnitude())
                .ok_or_else(overflow)?;
        }

        totals.net_balance = starting_balance
            .checked_add(totals.total_income)
            .and_then(|m| m.checked_sub(totals.total_expense))
            .and_then(|m| m.checked_sub(totals.total_savings))
            .ok_or_else(overflow)?;
        totals.ending_balance = totals.net_balance;
        Ok(totals)
    }
}
