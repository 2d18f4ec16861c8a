//! Year repository
//!
//! Manages loading and saving years to years.json, indexed by year value.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{Year, YearId};

use super::file_io::{read_json, write_json_atomic};
use super::poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct YearData {
    years: Vec<Year>,
}

/// Repository for year persistence
pub struct YearRepository {
    path: Option<PathBuf>,
    data: RwLock<HashMap<YearId, Year>>,
    /// Index: year value -> id
    by_value: RwLock<HashMap<i32, YearId>>,
}

impl YearRepository {
    /// Create a repository backed by a JSON file
    pub fn new(path: PathBuf) -> Self {
        Self::with_path(Some(path))
    }

    /// Create a repository that never touches disk
    pub fn in_memory() -> Self {
        Self::with_path(None)
    }

    fn with_path(path: Option<PathBuf>) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_value: RwLock::new(HashMap::new()),
        }
    }

    /// Load years from disk and rebuild the value index
    pub fn load(&self) -> Result<(), BudgetError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file_data: YearData = read_json(path)?;

        let mut data = self.data.write().map_err(poisoned)?;
        let mut by_value = self.by_value.write().map_err(poisoned)?;
        data.clear();
        by_value.clear();

        for year in file_data.years {
            if let Some(existing) = by_value.get(&year.year) {
                return Err(BudgetError::Storage(format!(
                    "Duplicate year {} in {} ({} and {})",
                    year.year,
                    path.display(),
                    existing,
                    year.id
                )));
            }
            by_value.insert(year.year, year.id);
            data.insert(year.id, year);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let years = self.get_all()?;
        write_json_atomic(path, &YearData { years })
    }

    pub fn get(&self, id: YearId) -> Result<Option<Year>, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.get(&id).cloned())
    }

    /// All years, ascending by value
    pub fn get_all(&self) -> Result<Vec<Year>, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut years: Vec<_> = data.values().cloned().collect();
        years.sort_by_key(|y| y.year);
        Ok(years)
    }

    pub fn find_by_value(&self, value: i32) -> Result<Option<Year>, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        let by_value = self.by_value.read().map_err(poisoned)?;
        Ok(by_value.get(&value).and_then(|id| data.get(id)).cloned())
    }

    /// Insert a new year; a second record for the same value is rejected
    pub fn insert(&self, year: Year) -> Result<(), BudgetError> {
        let mut data = self.data.write().map_err(poisoned)?;
        let mut by_value = self.by_value.write().map_err(poisoned)?;

        if let Some(existing) = by_value.get(&year.year) {
            if *existing != year.id {
                return Err(BudgetError::Storage(format!(
                    "Year {} already exists as {}",
                    year.year, existing
                )));
            }
        }

        by_value.insert(year.year, year.id);
        data.insert(year.id, year);
        Ok(())
    }

    pub fn remove(&self, id: YearId) -> Result<Option<Year>, BudgetError> {
        let mut data = self.data.write().map_err(poisoned)?;
        let mut by_value = self.by_value.write().map_err(poisoned)?;

        let removed = data.remove(&id);
        if let Some(year) = &removed {
            by_value.remove(&year.year);
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.len())
    }
}
