//! Entry repository
//!
//! Manages loading and saving entries to entries.json, indexed by month.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{Entry, EntryId, MonthId};

use super::file_io::{read_json, write_json_atomic};
use super::poisoned;
use super::query::EntryQuery;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EntryData {
    entries: Vec<Entry>,
}

/// Repository for entry persistence with a month index
pub struct EntryRepository {
    path: Option<PathBuf>,
    data: RwLock<HashMap<EntryId, Entry>>,
    /// Index: month_id -> entry ids
    by_month: RwLock<HashMap<MonthId, Vec<EntryId>>>,
}

impl EntryRepository {
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
            by_month: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), BudgetError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file_data: EntryData = read_json(path)?;

        let mut data = self.data.write().map_err(poisoned)?;
        let mut by_month = self.by_month.write().map_err(poisoned)?;
        data.clear();
        by_month.clear();

        for entry in file_data.entries {
            by_month.entry(entry.month_id).or_default().push(entry.id);
            data.insert(entry.id, entry);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = self.data.read().map_err(poisoned)?;
        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        write_json_atomic(path, &EntryData { entries })
    }

    pub fn get_all(&self) -> Result<Vec<Entry>, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(entries)
    }

    /// Run a query against the month index
    pub fn query(&self, query: &EntryQuery) -> Result<Vec<Entry>, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        let by_month = self.by_month.read().map_err(poisoned)?;

        let ids = by_month
            .get(&query.month_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let candidates = ids.iter().filter_map(|id| data.get(id).cloned());
        Ok(query.apply(candidates))
    }

    pub fn insert(&self, entry: Entry) -> Result<(), BudgetError> {
        let mut data = self.data.write().map_err(poisoned)?;
        let mut by_month = self.by_month.write().map_err(poisoned)?;

        if let Some(old) = data.get(&entry.id) {
            if let Some(ids) = by_month.get_mut(&old.month_id) {
                ids.retain(|&id| id != entry.id);
            }
        }

        by_month.entry(entry.month_id).or_default().push(entry.id);
        data.insert(entry.id, entry);
        Ok(())
    }

    pub fn remove(&self, id: EntryId) -> Result<Option<Entry>, BudgetError> {
        let mut data = self.data.write().map_err(poisoned)?;
        let mut by_month = self.by_month.write().map_err(poisoned)?;

        let removed = data.remove(&id);
        if let Some(entry) = &removed {
            if let Some(ids) = by_month.get_mut(&entry.month_id) {
                ids.retain(|&eid| eid != id);
            }
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, Money, NewEntry};
    use crate::storage::query::EntrySort;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EntryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = EntryRepository::new(temp_dir.path().join("entries.json"));
        (temp_dir, repo)
    }

    fn entry(month_id: MonthId, cents: i64, kind: EntryKind) -> Entry {
        Entry::from_new(month_id, NewEntry::new("test", Money::from_cents(cents), kind))
    }

    #[test]
    fn test_query_by_month() {
        let (_temp_dir, repo) = create_test_repo();
        let month1 = MonthId::new();
        let month2 = MonthId::new();

        repo.insert(entry(month1, 100, EntryKind::Income)).unwrap();
        repo.insert(entry(month1, 200, EntryKind::Expense)).unwrap();
        repo.insert(entry(month2, 300, EntryKind::Expense)).unwrap();

        assert_eq!(repo.query(&EntryQuery::for_month(month1)).unwrap().len(), 2);
        assert_eq!(repo.query(&EntryQuery::for_month(month2)).unwrap().len(), 1);
        assert!(repo.query(&EntryQuery::for_month(MonthId::new())).unwrap().is_empty());
    }

    #[test]
    fn test_query_sorted_by_amount() {
        let (_temp_dir, repo) = create_test_repo();
        let month = MonthId::new();
        for cents in [700, 100, 400] {
            repo.insert(entry(month, cents, EntryKind::Expense)).unwrap();
        }

        let sorted = repo
            .query(&EntryQuery::for_month(month).sorted(EntrySort::ByAmountAsc))
            .unwrap();
        let amounts: Vec<_> = sorted.iter().map(|e| e.amount.cents()).collect();
        assert_eq!(amounts, vec![100, 400, 700]);
    }

    #[test]
    fn test_remove_updates_index() {
        let (_temp_dir, repo) = create_test_repo();
        let month = MonthId::new();
        let first = entry(month, 100, EntryKind::Income);
        let id = first.id;
        repo.insert(first).unwrap();
        repo.insert(entry(month, 200, EntryKind::Income)).unwrap();

        repo.remove(id).unwrap();

        let remaining = repo.query(&EntryQuery::for_month(month)).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].amount.cents(), 200);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let month = MonthId::new();
        let e = entry(month, 4_250, EntryKind::Saving);
        let id = e.id;
        repo.insert(e).unwrap();
        repo.save().unwrap();

        let repo2 = EntryRepository::new(temp_dir.path().join("entries.json"));
        repo2.load().unwrap();
        let loaded = repo2.query(&EntryQuery::for_month(month)).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, id);
        assert_eq!(loaded[0].kind, EntryKind::Saving);
    }
}
