//! Month grid for one year

use async_trait::async_trait;

use crate::models::{MonthId, YearId};
use crate::services::{BudgetClient, MonthSummary};
use crate::storage::BudgetStore;

use super::Feature;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGridState {
    pub year_id: YearId,
    pub months: Vec<MonthSummary>,
    pub error_message: Option<String>,
}

impl MonthGridState {
    pub fn new(year_id: YearId) -> Self {
        Self {
            year_id,
            months: Vec::new(),
            error_message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthGridAction {
    Load,
    MonthsLoaded(Result<Vec<MonthSummary>, String>),
    /// Handled by the app, which pushes the month detail
    OpenMonth(MonthId),
}

#[async_trait]
impl Feature for MonthGridState {
    type Action = MonthGridAction;

    async fn reduce<S: BudgetStore>(
        &mut self,
        action: MonthGridAction,
        client: &BudgetClient<S>,
    ) -> Option<MonthGridAction> {
        match action {
            MonthGridAction::Load => Some(MonthGridAction::MonthsLoaded(
                client
                    .year_overview(self.year_id)
                    .await
                    .map_err(|e| e.to_string()),
            )),
            MonthGridAction::MonthsLoaded(Ok(months)) => {
                self.months = months;
                self.error_message = None;
                None
            }
            MonthGridAction::MonthsLoaded(Err(message)) => {
                self.error_message = Some(message);
                None
            }
            MonthGridAction::OpenMonth(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::FixedClock;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_load_fills_twelve_months() {
        let client = BudgetClient::new(Storage::in_memory(), FixedClock::on(2025, 1, 1));
        let year = client.add_year_if_needed(2025).await.unwrap();
        let mut state = MonthGridState::new(year.id);

        state.send(MonthGridAction::Load, &client).await;

        assert_eq!(state.months.len(), 12);
        assert_eq!(state.months[0].month.index, 1);
        assert!(state.error_message.is_none());
    }

    #[tokio::test]
    async fn test_load_for_missing_year_is_empty() {
        let client = BudgetClient::new(Storage::in_memory(), FixedClock::on(2025, 1, 1));
        let mut state = MonthGridState::new(YearId::new());

        state.send(MonthGridAction::Load, &client).await;

        assert!(state.months.is_empty());
        assert!(state.error_message.is_none());
    }
}
