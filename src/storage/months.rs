//! Month repository
//!
//! Manages loading and saving months to months.json. Months are indexed by
//! (year, month index), which is unique.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{Month, MonthId, YearId};

use super::file_io::{read_json, write_json_atomic};
use super::poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MonthData {
    months: Vec<Month>,
}

/// Repository for month persistence
pub struct MonthRepository {
    path: Option<PathBuf>,
    data: RwLock<HashMap<MonthId, Month>>,
    /// Index: (year_id, index) -> month id
    by_slot: RwLock<HashMap<(YearId, u32), MonthId>>,
}

impl MonthRepository {
    pub fn new(path: PathBuf) -> Self {
        Self::with_path(Some(path))
    }

    pub fn in_memory() -> Self {
        Self::with_path(None)
    }

    fn with_path(path: Option<PathBuf>) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_slot: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), BudgetError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file_data: MonthData = read_json(path)?;

        let mut data = self.data.write().map_err(poisoned)?;
        let mut by_slot = self.by_slot.write().map_err(poisoned)?;
        data.clear();
        by_slot.clear();

        for month in file_data.months {
            let slot = (month.year_id, month.index);
            if by_slot.contains_key(&slot) {
                return Err(BudgetError::Storage(format!(
                    "Duplicate month {} for year {} in {}",
                    month.index,
                    month.year_id,
                    path.display()
                )));
            }
            by_slot.insert(slot, month.id);
            data.insert(month.id, month);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = self.data.read().map_err(poisoned)?;
        let mut months: Vec<_> = data.values().cloned().collect();
        months.sort_by(|a, b| a.year_id.cmp(&b.year_id).then(a.index.cmp(&b.index)));
        write_json_atomic(path, &MonthData { months })
    }

    pub fn get(&self, id: MonthId) -> Result<Option<Month>, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.get(&id).cloned())
    }

    pub fn get_all(&self) -> Result<Vec<Month>, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.values().cloned().collect())
    }

    pub fn find(&self, year_id: YearId, index: u32) -> Result<Option<Month>, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        let by_slot = self.by_slot.read().map_err(poisoned)?;
        Ok(by_slot.get(&(year_id, index)).and_then(|id| data.get(id)).cloned())
    }

    /// Months of a year, ascending by index
    pub fn get_by_year(&self, year_id: YearId) -> Result<Vec<Month>, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut months: Vec<_> = data
            .values()
            .filter(|m| m.year_id == year_id)
            .cloned()
            .collect();
        months.sort_by_key(|m| m.index);
        Ok(months)
    }

    /// Insert a new month; a second month in the same slot is rejected
    pub fn insert(&self, month: Month) -> Result<(), BudgetError> {
        let mut data = self.data.write().map_err(poisoned)?;
        let mut by_slot = self.by_slot.write().map_err(poisoned)?;

        let slot = (month.year_id, month.index);
        if let Some(existing) = by_slot.get(&slot) {
            if *existing != month.id {
                return Err(BudgetError::Storage(format!(
                    "Month {} of year {} already exists as {}",
                    month.index, month.year_id, existing
                )));
            }
        }

        by_slot.insert(slot, month.id);
        data.insert(month.id, month);
        Ok(())
    }

    pub fn remove(&self, id: MonthId) -> Result<Option<Month>, BudgetError> {
        let mut data = self.data.write().map_err(poisoned)?;
        let mut by_slot = self.by_slot.write().map_err(poisoned)?;

        let removed = data.remove(&id);
        if let Some(month) = &removed {
            by_slot.remove(&(month.year_id, month.index));
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.len())
    }
}
