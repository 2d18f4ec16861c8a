//! Add-entry form

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Entry, EntryKind, MonthId, Money, NewEntry};
use crate::services::BudgetClient;
use crate::storage::BudgetStore;

use super::Feature;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEntryState {
    pub month_id: MonthId,
    pub model: NewEntry,
    /// Set once the entry has been stored
    pub saved: Option<Entry>,
    pub error_message: Option<String>,
}

impl AddEntryState {
    /// An empty form for a month, dated `now`
    pub fn new(month_id: MonthId, now: DateTime<Utc>) -> Self {
        Self {
            month_id,
            model: NewEntry::default().dated(now),
            saved: None,
            error_message: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if self.model.amount.is_zero() {
            return Err("Amount must not be zero".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddEntryAction {
    SetTitle(String),
    SetAmount(Money),
    SetDate(DateTime<Utc>),
    SetKind(EntryKind),
    SetNote(String),
    SetCarryover(bool),
    SaveTapped,
    Saved(Entry),
}

#[async_trait]
impl Feature for AddEntryState {
    type Action = AddEntryAction;

    async fn reduce<S: BudgetStore>(
        &mut self,
        action: AddEntryAction,
        client: &BudgetClient<S>,
    ) -> Option<AddEntryAction> {
        match action {
            AddEntryAction::SetTitle(title) => self.model.title = title,
            AddEntryAction::SetAmount(amount) => self.model.amount = amount,
            AddEntryAction::SetDate(date) => self.model.date = date,
            AddEntryAction::SetKind(kind) => self.model.kind = kind,
            AddEntryAction::SetNote(note) => self.model.note = note,
            AddEntryAction::SetCarryover(flag) => self.model.is_carryover = flag,
            AddEntryAction::SaveTapped => {
                if let Err(message) = self.validate() {
                    self.error_message = Some(message);
                    return None;
                }
                return match client.add_entry(self.month_id, self.model.clone()).await {
                    Ok(entry) => Some(AddEntryAction::Saved(entry)),
                    Err(e) => {
                        self.error_message = Some(e.to_string());
                        None
                    }
                };
            }
            AddEntryAction::Saved(entry) => {
                self.error_message = None;
                self.saved = Some(entry);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Clock, FixedClock};
    use crate::storage::{EntrySort, Storage};

    #[tokio::test]
    async fn test_fill_and_save() {
        let clock = FixedClock::on(2025, 3, 9);
        let client = BudgetClient::new(Storage::in_memory(), clock);
        let month = client.bootstrap_current_month().await.unwrap();
        let mut state = AddEntryState::new(month.id, clock.now());

        for action in [
            AddEntryAction::SetTitle("Bonus".into()),
            AddEntryAction::SetAmount(Money::from_major(250)),
            AddEntryAction::SetKind(EntryKind::Income),
            AddEntryAction::SetNote("Q1".into()),
            AddEntryAction::SetCarryover(true),
            AddEntryAction::SaveTapped,
        ] {
            state.send(action, &client).await;
        }

        let saved = state.saved.clone().unwrap();
        assert_eq!(saved.kind, EntryKind::Income);
        assert!(saved.is_carryover);
        assert_eq!(saved.date, clock.now());

        let stored = client.entries_for_month(month.id, EntrySort::default()).await.unwrap();
        assert_eq!(stored, vec![saved]);
    }

    #[tokio::test]
    async fn test_save_without_title_is_rejected() {
        let client = BudgetClient::new(Storage::in_memory(), FixedClock::on(2025, 3, 9));
        let month = client.bootstrap_current_month().await.unwrap();
        let mut state = AddEntryState::new(month.id, Utc::now());

        state.send(AddEntryAction::SetAmount(Money::from_major(5)), &client).await;
        state.send(AddEntryAction::SaveTapped, &client).await;

        assert!(state.saved.is_none());
        assert_eq!(state.error_message.as_deref(), Some("Title is required"));
        assert_eq!(client.store().entries.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_to_deleted_month_reports_error() {
        let client = BudgetClient::new(Storage::in_memory(), FixedClock::on(2025, 3, 9));
        let mut state = AddEntryState::new(MonthId::new(), Utc::now());

        state.send(AddEntryAction::SetTitle("Rent".into()), &client).await;
        state.send(AddEntryAction::SetAmount(Money::from_major(900)), &client).await;
        state.send(AddEntryAction::SaveTapped, &client).await;

        assert!(state.saved.is_none());
        assert!(state.error_message.unwrap().contains("Month not found"));
    }
}
