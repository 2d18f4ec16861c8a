//! Data access client
//!
//! `BudgetClient` is the only way the rest of the application touches the
//! store. Each public operation holds the client's gate for its whole
//! read-modify-write sequence, so two get-or-create calls can never both
//! create the same year or month.
//!
//! Every mutation is recorded as pending the moment the store accepts it and
//! stays pending until a commit succeeds. A failed commit is retried by the
//! next mutating operation, together with that operation's own changes.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Entry, EntryId, EntryKind, Money, Month, MonthId, MonthPeriod, MonthTotals, NewEntry, Year,
    YearId,
};
use crate::storage::{BudgetStore, EntryQuery, EntrySort};

use super::clock::Clock;
use super::rollover::{self, CreationPath, Ensured, RolloverPolicy};

/// A month together with its derived balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: Month,
    pub period: MonthPeriod,
    pub totals: MonthTotals,
    pub entry_count: usize,
}

impl MonthSummary {
    /// "March 2025"
    pub fn title(&self) -> String {
        self.period.title()
    }
}

/// Every record in the store, for export
#[derive(Debug, Clone, Default)]
pub struct BudgetSnapshot {
    pub years: Vec<Year>,
    pub months: Vec<Month>,
    pub entries: Vec<Entry>,
}

/// Store mutations not yet made durable, as their audit records
#[derive(Debug, Default)]
struct Pending {
    changes: Vec<AuditEntry>,
}

impl Pending {
    fn note_year(&mut self, year: &Ensured<Year>) {
        if year.created {
            self.changes.push(AuditEntry::create(
                EntityType::Year,
                year.value.id.full(),
                Some(year.value.year.to_string()),
                &year.value,
            ));
        }
    }

    fn note_month(&mut self, month: &Ensured<Month>, year_value: i32) {
        if month.created {
            self.changes.push(AuditEntry::create(
                EntityType::Month,
                month.value.id.full(),
                Some(month_label(&month.value, Some(year_value))),
                &month.value,
            ));
        }
    }

    fn note_removed_entry(&mut self, entry: &Entry) {
        self.changes.push(AuditEntry::delete(
            EntityType::Entry,
            entry.id.full(),
            Some(entry.title.clone()),
            entry,
        ));
    }
}

/// Serialized access to a budget store
pub struct BudgetClient<S: BudgetStore> {
    store: S,
    clock: Arc<dyn Clock>,
    policy: RolloverPolicy,
    audit: Option<AuditLogger>,
    gate: Mutex<Pending>,
}

impl<S: BudgetStore> BudgetClient<S> {
    pub fn new(store: S, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Arc::new(clock),
            policy: RolloverPolicy::default(),
            audit: None,
            gate: Mutex::new(Pending::default()),
        }
    }

    pub fn with_policy(mut self, policy: RolloverPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Record creates and deletes to the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn policy(&self) -> RolloverPolicy {
        self.policy
    }

    pub fn audit_log(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    // === Bootstrap ===

    /// Make sure the current calendar month exists, carrying the previous
    /// month's ending balance into it if it has to be created
    pub async fn bootstrap_current_month(&self) -> BudgetResult<Month> {
        let mut pending = self.gate.lock().await;

        let period = self.clock.current_period();
        let month = self
            .month_for_period_locked(&mut pending, period, CreationPath::Bootstrap)
            .await?;
        self.finish(&mut pending).await?;

        if month.created {
            tracing::info!(
                period = %period,
                starting = %month.value.starting_balance,
                "bootstrapped current month"
            );
        }

        Ok(month.value)
    }

    /// The month for today's calendar month, created if missing
    pub async fn fetch_current_month(&self) -> BudgetResult<Month> {
        let mut pending = self.gate.lock().await;

        let period = self.clock.current_period();
        let month = self
            .month_for_period_locked(&mut pending, period, CreationPath::CurrentMonth)
            .await?;
        self.finish(&mut pending).await?;

        Ok(month.value)
    }

    // === Years ===

    /// All years, ascending
    pub async fn fetch_years(&self) -> BudgetResult<Vec<Year>> {
        let _gate = self.gate.lock().await;
        self.store.years().await
    }

    /// The year with this value, created if it does not exist yet
    pub async fn add_year_if_needed(&self, value: i32) -> BudgetResult<Year> {
        let mut pending = self.gate.lock().await;

        let year = rollover::ensure_year(&self.store, value).await?;
        pending.note_year(&year);
        self.finish(&mut pending).await?;

        Ok(year.value)
    }

    /// Delete years along with their months and entries
    ///
    /// Ids that no longer exist are skipped. Returns the number of years removed.
    pub async fn delete_years(&self, ids: &[YearId]) -> BudgetResult<usize> {
        let mut pending = self.gate.lock().await;
        let mut removed = 0;

        for &id in ids {
            let Some(year) = self.store.year(id).await? else {
                tracing::debug!(%id, "skipping delete of missing year");
                continue;
            };

            for month in self.store.months_of_year(id).await? {
                self.remove_month_cascade(&mut pending, &month, Some(year.year))
                    .await?;
            }

            self.store.remove_year(id).await?;
            pending.changes.push(AuditEntry::delete(
                EntityType::Year,
                id.full(),
                Some(year.year.to_string()),
                &year,
            ));
            removed += 1;
        }

        self.finish(&mut pending).await?;
        Ok(removed)
    }

    // === Months ===

    /// All twelve months of a year, creating any that are missing
    ///
    /// A year that no longer exists yields an empty list.
    pub async fn months_for_year(&self, year_id: YearId) -> BudgetResult<Vec<Month>> {
        let mut pending = self.gate.lock().await;
        let months = self.months_for_year_locked(&mut pending, year_id).await?;
        self.finish(&mut pending).await?;
        Ok(months)
    }

    /// Month `index` of a year, created if missing
    pub async fn ensure_month(&self, year_id: YearId, index: u32) -> BudgetResult<Month> {
        let mut pending = self.gate.lock().await;

        let year = self
            .store
            .year(year_id)
            .await?
            .ok_or_else(|| BudgetError::year_not_found(year_id.to_string()))?;

        let opening = self.policy.opening_for(CreationPath::EnsureMonth);
        let month = rollover::ensure_month(&self.store, &year, index, opening).await?;
        pending.note_month(&month, year.year);
        self.finish(&mut pending).await?;

        Ok(month.value)
    }

    /// The month for a calendar period, creating its year and month as needed
    pub async fn month_for_period(&self, period: MonthPeriod) -> BudgetResult<Month> {
        let mut pending = self.gate.lock().await;
        let month = self
            .month_for_period_locked(&mut pending, period, CreationPath::EnsureMonth)
            .await?;
        self.finish(&mut pending).await?;
        Ok(month.value)
    }

    /// Look up the month for a calendar period without creating anything
    pub async fn find_month_for_period(&self, period: MonthPeriod) -> BudgetResult<Option<Month>> {
        let _gate = self.gate.lock().await;

        match self.store.year_by_value(period.year()).await? {
            Some(year) => self.store.month_in_slot(year.id, period.month()).await,
            None => Ok(None),
        }
    }

    pub async fn fetch_month_by_id(&self, id: MonthId) -> BudgetResult<Month> {
        let _gate = self.gate.lock().await;
        self.require_month(id).await
    }

    /// Delete months along with their entries
    ///
    /// Ids that no longer exist are skipped. Returns the number of months removed.
    pub async fn delete_months(&self, ids: &[MonthId]) -> BudgetResult<usize> {
        let mut pending = self.gate.lock().await;
        let mut removed = 0;

        for &id in ids {
            let Some(month) = self.store.month(id).await? else {
                tracing::debug!(%id, "skipping delete of missing month");
                continue;
            };
            let year_value = self.store.year(month.year_id).await?.map(|y| y.year);
            self.remove_month_cascade(&mut pending, &month, year_value)
                .await?;
            removed += 1;
        }

        self.finish(&mut pending).await?;
        Ok(removed)
    }

    /// A month with its totals and entry count
    pub async fn month_summary(&self, month_id: MonthId) -> BudgetResult<MonthSummary> {
        let _gate = self.gate.lock().await;
        let month = self.require_month(month_id).await?;
        self.summarize(month).await
    }

    /// Summaries for all twelve months of a year, creating missing months
    pub async fn year_overview(&self, year_id: YearId) -> BudgetResult<Vec<MonthSummary>> {
        let mut pending = self.gate.lock().await;

        let months = self.months_for_year_locked(&mut pending, year_id).await?;
        self.finish(&mut pending).await?;

        let mut summaries = Vec::with_capacity(months.len());
        for month in months {
            summaries.push(self.summarize(month).await?);
        }
        Ok(summaries)
    }

    // === Entries ===

    /// Entries of a month in the requested order
    ///
    /// A month that no longer exists yields an empty list.
    pub async fn entries_for_month(
        &self,
        month_id: MonthId,
        sort: EntrySort,
    ) -> BudgetResult<Vec<Entry>> {
        let _gate = self.gate.lock().await;
        self.store
            .entries(&EntryQuery::for_month(month_id).sorted(sort))
            .await
    }

    /// Entries of one kind within a month
    pub async fn entries_of_kind(
        &self,
        month_id: MonthId,
        kind: EntryKind,
        sort: EntrySort,
    ) -> BudgetResult<Vec<Entry>> {
        let _gate = self.gate.lock().await;
        self.store
            .entries(&EntryQuery::for_month(month_id).kind(kind).sorted(sort))
            .await
    }

    /// Record a new entry in a month
    ///
    /// Amounts larger than [`Money::MAX_ENTRY`] are rejected so that month
    /// totals stay representable.
    pub async fn add_entry(&self, month_id: MonthId, new: NewEntry) -> BudgetResult<Entry> {
        let mut pending = self.gate.lock().await;

        let month = self.require_month(month_id).await?;
        if new.amount.magnitude() > Money::MAX_ENTRY {
            return Err(BudgetError::Validation(format!(
                "Amount {} exceeds the largest allowed entry of {}",
                new.amount.magnitude(),
                Money::MAX_ENTRY
            )));
        }

        let entry = Entry::from_new(month.id, new);
        self.store.insert_entry(entry.clone()).await?;
        pending.changes.push(AuditEntry::create(
            EntityType::Entry,
            entry.id.full(),
            Some(entry.title.clone()),
            &entry,
        ));
        self.finish(&mut pending).await?;

        tracing::debug!(id = %entry.id, month = %month.id, kind = %entry.kind, "added entry");
        Ok(entry)
    }

    /// Delete entries; ids that no longer exist are skipped
    pub async fn delete_entries(&self, ids: &[EntryId]) -> BudgetResult<usize> {
        let mut pending = self.gate.lock().await;

        let mut removed = 0;
        for &id in ids {
            match self.store.remove_entry(id).await? {
                Some(entry) => {
                    pending.note_removed_entry(&entry);
                    removed += 1;
                }
                None => tracing::debug!(%id, "skipping delete of missing entry"),
            }
        }

        self.finish(&mut pending).await?;
        Ok(removed)
    }

    // === Export ===

    /// Every year, month and entry in the store
    pub async fn snapshot(&self) -> BudgetResult<BudgetSnapshot> {
        let _gate = self.gate.lock().await;
        Ok(BudgetSnapshot {
            years: self.store.years().await?,
            months: self.store.all_months().await?,
            entries: self.store.all_entries().await?,
        })
    }

    // === Helpers (caller holds the gate) ===

    async fn require_month(&self, id: MonthId) -> BudgetResult<Month> {
        self.store
            .month(id)
            .await?
            .ok_or_else(|| BudgetError::month_not_found(id.to_string()))
    }

    async fn months_for_year_locked(
        &self,
        pending: &mut Pending,
        year_id: YearId,
    ) -> BudgetResult<Vec<Month>> {
        let Some(year) = self.store.year(year_id).await? else {
            tracing::warn!(%year_id, "months requested for a year that no longer exists");
            return Ok(Vec::new());
        };

        let opening = self.policy.opening_for(CreationPath::MonthsForYear);
        let mut months = Vec::with_capacity(12);
        for index in 1..=12 {
            let month = rollover::ensure_month(&self.store, &year, index, opening).await?;
            pending.note_month(&month, year.year);
            months.push(month.value);
        }

        Ok(months)
    }

    async fn month_for_period_locked(
        &self,
        pending: &mut Pending,
        period: MonthPeriod,
        path: CreationPath,
    ) -> BudgetResult<Ensured<Month>> {
        let year = rollover::ensure_year(&self.store, period.year()).await?;
        pending.note_year(&year);

        let opening = self.policy.opening_for(path);
        let month =
            rollover::ensure_month(&self.store, &year.value, period.month(), opening).await?;
        pending.note_month(&month, year.value.year);

        Ok(month)
    }

    async fn summarize(&self, month: Month) -> BudgetResult<MonthSummary> {
        let year = self
            .store
            .year(month.year_id)
            .await?
            .ok_or_else(|| BudgetError::year_not_found(month.year_id.to_string()))?;

        let entries = self.store.entries(&EntryQuery::for_month(month.id)).await?;
        let totals = MonthTotals::compute(month.starting_balance, &entries)?;

        Ok(MonthSummary {
            period: MonthPeriod::new(year.year, month.index)?,
            totals,
            entry_count: entries.len(),
            month,
        })
    }

    async fn remove_month_cascade(
        &self,
        pending: &mut Pending,
        month: &Month,
        year_value: Option<i32>,
    ) -> BudgetResult<()> {
        for entry in self.store.entries(&EntryQuery::for_month(month.id)).await? {
            if let Some(entry) = self.store.remove_entry(entry.id).await? {
                pending.note_removed_entry(&entry);
            }
        }

        self.store.remove_month(month.id).await?;
        pending.changes.push(AuditEntry::delete(
            EntityType::Month,
            month.id.full(),
            Some(month_label(month, year_value)),
            month,
        ));
        Ok(())
    }

    /// Commit pending changes and write their audit records
    ///
    /// Nothing pending means nothing to commit. On a failed commit the
    /// changes stay pending.
    async fn finish(&self, pending: &mut Pending) -> BudgetResult<()> {
        if pending.changes.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.store.commit().await {
            tracing::warn!(
                pending = pending.changes.len(),
                error = %e,
                "commit failed, changes kept for retry"
            );
            return Err(e);
        }

        let committed = std::mem::take(&mut pending.changes);
        if let Some(logger) = &self.audit {
            logger.log_batch(&committed)?;
        }
        Ok(())
    }
}

fn month_label(month: &Month, year_value: Option<i32>) -> String {
    match year_value {
        Some(year) => format!("{} {}", month.name(), year),
        None => month.name().to_string(),
    }
}
