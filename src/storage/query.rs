//! Typed query surface for entry listings
//!
//! Equality predicates and a sort descriptor (field + direction) instead of
//! free-form predicate strings.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;
use crate::models::{Entry, EntryKind, MonthId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Entry fields that listings can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryField {
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDescriptor {
    pub field: EntryField,
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(field: EntryField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Compare two entries; ties fall back to creation order so listings are stable
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        let primary = match self.field {
            EntryField::Date => a.date.cmp(&b.date),
            EntryField::Amount => a.amount.magnitude().cmp(&b.amount.magnitude()),
        };
        let primary = match self.direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        primary
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// The four orderings offered for a month's entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntrySort {
    #[default]
    ByDateDesc,
    ByDateAsc,
    ByAmountDesc,
    ByAmountAsc,
}

impl EntrySort {
    pub const ALL: [EntrySort; 4] = [
        EntrySort::ByDateDesc,
        EntrySort::ByDateAsc,
        EntrySort::ByAmountDesc,
        EntrySort::ByAmountAsc,
    ];

    pub fn descriptor(&self) -> SortDescriptor {
        match self {
            Self::ByDateDesc => SortDescriptor::new(EntryField::Date, SortDirection::Descending),
            Self::ByDateAsc => SortDescriptor::new(EntryField::Date, SortDirection::Ascending),
            Self::ByAmountDesc => SortDescriptor::new(EntryField::Amount, SortDirection::Descending),
            Self::ByAmountAsc => SortDescriptor::new(EntryField::Amount, SortDirection::Ascending),
        }
    }

    /// Short label for table headers
    pub fn label(&self) -> &'static str {
        match self {
            Self::ByDateAsc => "Date ↑",
            Self::ByDateDesc => "Date ↓",
            Self::ByAmountAsc => "Amount ↑",
            Self::ByAmountDesc => "Amount ↓",
        }
    }
}

impl fmt::Display for EntrySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ByDateDesc => "date-desc",
            Self::ByDateAsc => "date-asc",
            Self::ByAmountDesc => "amount-desc",
            Self::ByAmountAsc => "amount-asc",
        };
        f.write_str(name)
    }
}

impl FromStr for EntrySort {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date-desc" | "date" => Ok(Self::ByDateDesc),
            "date-asc" => Ok(Self::ByDateAsc),
            "amount-desc" | "amount" => Ok(Self::ByAmountDesc),
            "amount-asc" => Ok(Self::ByAmountAsc),
            other => Err(BudgetError::Validation(format!(
                "Unknown sort '{}'. Use date-desc, date-asc, amount-desc or amount-asc",
                other
            ))),
        }
    }
}

/// Query for the entries of one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryQuery {
    pub month_id: MonthId,
    pub kind: Option<EntryKind>,
    pub sort: SortDescriptor,
}

impl EntryQuery {
    /// All entries of a month, newest first
    pub fn for_month(month_id: MonthId) -> Self {
        Self {
            month_id,
            kind: None,
            sort: EntrySort::default().descriptor(),
        }
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn sorted(mut self, sort: EntrySort) -> Self {
        self.sort = sort.descriptor();
        self
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        entry.month_id == self.month_id && self.kind.map_or(true, |k| entry.kind == k)
    }

    /// Filter and order a set of candidate entries
    pub fn apply<I>(&self, entries: I) -> Vec<Entry>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut matched: Vec<Entry> = entries.into_iter().filter(|e| self.matches(e)).collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }
}
