//! Storage layer
//!
//! `BudgetStore` is the object-store seam the rest of the crate talks to:
//! typed create/read/delete, equality lookups, sorted entry queries and an
//! explicit `commit`. `Storage` implements it with one JSON file per entity
//! kind (atomic writes) or purely in memory.

pub mod entries;
pub mod file_io;
pub mod months;
pub mod query;
pub mod years;

pub use entries::EntryRepository;
pub use months::MonthRepository;
pub use query::{EntryField, EntryQuery, EntrySort, SortDescriptor, SortDirection};
pub use years::YearRepository;

use std::sync::PoisonError;

use async_trait::async_trait;

use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Entry, EntryId, Month, MonthId, Year, YearId};

pub(crate) fn poisoned<T>(err: PoisonError<T>) -> BudgetError {
    BudgetError::Storage(format!("Failed to acquire lock: {}", err))
}

/// The persistence collaborator behind the data access layer
///
/// Implementations never cascade: removing a year leaves its months in place.
/// Mutations become durable on `commit`.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// All years, ascending by value
    async fn years(&self) -> BudgetResult<Vec<Year>>;
    async fn year(&self, id: YearId) -> BudgetResult<Option<Year>>;
    async fn year_by_value(&self, value: i32) -> BudgetResult<Option<Year>>;
    async fn insert_year(&self, year: Year) -> BudgetResult<()>;
    async fn remove_year(&self, id: YearId) -> BudgetResult<Option<Year>>;

    /// Months of a year, ascending by index
    async fn months_of_year(&self, year_id: YearId) -> BudgetResult<Vec<Month>>;
    async fn all_months(&self) -> BudgetResult<Vec<Month>>;
    async fn month(&self, id: MonthId) -> BudgetResult<Option<Month>>;
    async fn month_in_slot(&self, year_id: YearId, index: u32) -> BudgetResult<Option<Month>>;
    async fn insert_month(&self, month: Month) -> BudgetResult<()>;
    async fn remove_month(&self, id: MonthId) -> BudgetResult<Option<Month>>;

    async fn entries(&self, query: &EntryQuery) -> BudgetResult<Vec<Entry>>;
    async fn all_entries(&self) -> BudgetResult<Vec<Entry>>;
    async fn insert_entry(&self, entry: Entry) -> BudgetResult<()>;
    async fn remove_entry(&self, id: EntryId) -> BudgetResult<Option<Entry>>;

    /// Persist pending changes
    async fn commit(&self) -> BudgetResult<()>;
}

/// Repository-backed store
pub struct Storage {
    paths: Option<BudgetPaths>,
    pub years: YearRepository,
    pub months: MonthRepository,
    pub entries: EntryRepository,
}

impl Storage {
    /// Create a file-backed store; call `load_all` before use
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            years: YearRepository::new(paths.years_file()),
            months: MonthRepository::new(paths.months_file()),
            entries: EntryRepository::new(paths.entries_file()),
            paths: Some(paths),
        })
    }

    /// Create a file-backed store and load everything from disk
    pub fn open(paths: BudgetPaths) -> Result<Self, BudgetError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// A store that keeps everything in memory; `commit` is a no-op
    pub fn in_memory() -> Self {
        Self {
            paths: None,
            years: YearRepository::in_memory(),
            months: MonthRepository::in_memory(),
            entries: EntryRepository::in_memory(),
        }
    }

    pub fn paths(&self) -> Option<&BudgetPaths> {
        self.paths.as_ref()
    }

    pub fn load_all(&self) -> Result<(), BudgetError> {
        self.years.load()?;
        self.months.load()?;
        self.entries.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.years.save()?;
        self.months.save()?;
        self.entries.save()?;
        Ok(())
    }
}

#[async_trait]
impl BudgetStore for Storage {
    async fn years(&self) -> BudgetResult<Vec<Year>> {
        self.years.get_all()
    }

    async fn year(&self, id: YearId) -> BudgetResult<Option<Year>> {
        self.years.get(id)
    }

    async fn year_by_value(&self, value: i32) -> BudgetResult<Option<Year>> {
        self.years.find_by_value(value)
    }

    async fn insert_year(&self, year: Year) -> BudgetResult<()> {
        self.years.insert(year)
    }

    async fn remove_year(&self, id: YearId) -> BudgetResult<Option<Year>> {
        self.years.remove(id)
    }

    async fn months_of_year(&self, year_id: YearId) -> BudgetResult<Vec<Month>> {
        self.months.get_by_year(year_id)
    }

    async fn all_months(&self) -> BudgetResult<Vec<Month>> {
        self.months.get_all()
    }

    async fn month(&self, id: MonthId) -> BudgetResult<Option<Month>> {
        self.months.get(id)
    }

    async fn month_in_slot(&self, year_id: YearId, index: u32) -> BudgetResult<Option<Month>> {
        self.months.find(year_id, index)
    }

    async fn insert_month(&self, month: Month) -> BudgetResult<()> {
        self.months.insert(month)
    }

    async fn remove_month(&self, id: MonthId) -> BudgetResult<Option<Month>> {
        self.months.remove(id)
    }

    async fn entries(&self, query: &EntryQuery) -> BudgetResult<Vec<Entry>> {
        self.entries.query(query)
    }

    async fn all_entries(&self) -> BudgetResult<Vec<Entry>> {
        self.entries.get_all()
    }

    async fn insert_entry(&self, entry: Entry) -> BudgetResult<()> {
        self.entries.insert(entry)
    }

    async fn remove_entry(&self, id: EntryId) -> BudgetResult<Option<Entry>> {
        self.entries.remove(id)
    }

    async fn commit(&self) -> BudgetResult<()> {
        tracing::debug!(persistent = self.paths.is_some(), "committing store");
        self.save_all()
    }
}
