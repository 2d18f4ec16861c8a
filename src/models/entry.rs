//! Entry model
//!
//! An entry is one income, expense or saving record inside a month. The
//! stored amount is a magnitude; its effect on the balance comes from `kind`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{EntryId, MonthId};
use super::money::Money;
use crate::error::BudgetError;

/// What an entry does to the month's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    #[default]
    Expense,
    Saving,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::Income, EntryKind::Expense, EntryKind::Saving];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Saving => "saving",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            "saving" | "savings" => Ok(Self::Saving),
            other => Err(BudgetError::Validation(format!(
                "Unknown entry kind '{}'. Use income, expense or saving",
                other
            ))),
        }
    }
}

/// User-supplied data for a new entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub kind: EntryKind,
    pub note: String,
    pub is_carryover: bool,
}

impl Default for NewEntry {
    fn default() -> Self {
        Self {
            title: String::new(),
            amount: Money::zero(),
            date: Utc::now(),
            kind: EntryKind::default(),
            note: String::new(),
            is_carryover: false,
        }
    }
}

impl NewEntry {
    pub fn new(title: impl Into<String>, amount: Money, kind: EntryKind) -> Self {
        Self {
            title: title.into(),
            amount,
            kind,
            ..Self::default()
        }
    }

    pub fn dated(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn carryover(mut self, is_carryover: bool) -> Self {
        self.is_carryover = is_carryover;
        self
    }
}

/// A stored income, expense or saving record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,

    /// Owning month
    pub month_id: MonthId,

    #[serde(default)]
    pub title: String,

    /// Magnitude only
    pub amount: Money,

    pub date: DateTime<Utc>,

    pub kind: EntryKind,

    #[serde(default)]
    pub note: String,

    #[serde(default)]
    pub is_carryover: bool,

    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Build an entry for a month, normalizing the amount to its magnitude
    pub fn from_new(month_id: MonthId, new: NewEntry) -> Self {
        Self {
            id: EntryId::new(),
            month_id,
            title: new.title.trim().to_string(),
            amount: new.amount.magnitude(),
            date: new.date,
            kind: new.kind,
            note: new.note,
            is_carryover: new.is_carryover,
            created_at: Utc::now(),
        }
    }

    /// Signed contribution to the month's net balance
    pub fn effect(&self) -> Money {
        match self.kind {
            EntryKind::Income => self.amount.magnitude(),
            EntryKind::Expense | EntryKind::Saving => -self.amount.magnitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("Income".parse::<EntryKind>().unwrap(), EntryKind::Income);
        assert_eq!("savings".parse::<EntryKind>().unwrap(), EntryKind::Saving);
        assert!("transfer".parse::<EntryKind>().unwrap_err().is_validation());
    }

    #[test]
    fn test_kind_serialized_lowercase() {
        assert_eq!(serde_json::to_string(&EntryKind::Saving).unwrap(), "\"saving\"");
    }

    #[test]
    fn test_from_new_normalizes_amount() {
        let month_id = MonthId::new();
        let new = NewEntry::new("  Rent ", Money::from_major(-900), EntryKind::Expense);
        let entry = Entry::from_new(month_id, new);

        assert_eq!(entry.title, "Rent");
        assert_eq!(entry.amount, Money::from_major(900));
        assert_eq!(entry.month_id, month_id);
    }

    #[test]
    fn test_effect_follows_kind() {
        let month_id = MonthId::new();
        let income = Entry::from_new(month_id, NewEntry::new("Salary", Money::from_major(100), EntryKind::Income));
        let saving = Entry::from_new(month_id, NewEntry::new("Jar", Money::from_major(30), EntryKind::Saving));

        assert_eq!(income.effect(), Money::from_major(100));
        assert_eq!(saving.effect(), Money::from_major(-30));
    }

    #[test]
    fn test_builder_defaults_to_expense() {
        let new = NewEntry::default().with_note("cash").carryover(true);
        assert_eq!(new.kind, EntryKind::Expense);
        assert_eq!(new.note, "cash");
        assert!(new.is_carryover);
    }
}
