//! Year list screen

use async_trait::async_trait;

use crate::models::{Year, YearId};
use crate::services::BudgetClient;
use crate::storage::BudgetStore;

use super::{pick, Feature};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearListState {
    pub years: Vec<Year>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearListAction {
    Load,
    YearsLoaded(Result<Vec<Year>, String>),
    AddYear(i32),
    /// Delete the years at these list positions
    Delete(Vec<usize>),
    /// Handled by the app, which pushes the month grid
    OpenMonthGrid(YearId),
}

#[async_trait]
impl Feature for YearListState {
    type Action = YearListAction;

    async fn reduce<S: BudgetStore>(
        &mut self,
        action: YearListAction,
        client: &BudgetClient<S>,
    ) -> Option<YearListAction> {
        match action {
            YearListAction::Load => Some(YearListAction::YearsLoaded(
                client.fetch_years().await.map_err(|e| e.to_string()),
            )),
            YearListAction::YearsLoaded(Ok(years)) => {
                self.years = years;
                self.error_message = None;
                None
            }
            YearListAction::YearsLoaded(Err(message)) => {
                self.error_message = Some(message);
                None
            }
            YearListAction::AddYear(value) => match client.add_year_if_needed(value).await {
                Ok(_) => Some(YearListAction::Load),
                Err(e) => {
                    self.error_message = Some(e.to_string());
                    None
                }
            },
            YearListAction::Delete(offsets) => {
                let ids = pick(&self.years, &offsets, |y| y.id);
                if let Err(e) = client.delete_years(&ids).await {
                    self.error_message = Some(e.to_string());
                }
                Some(YearListAction::Load)
            }
            YearListAction::OpenMonthGrid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::FixedClock;
    use crate::storage::Storage;

    fn client() -> BudgetClient<Storage> {
        BudgetClient::new(Storage::in_memory(), FixedClock::on(2025, 1, 1))
    }

    #[tokio::test]
    async fn test_add_year_reloads() {
        let client = client();
        let mut state = YearListState::default();

        state.send(YearListAction::AddYear(2026), &client).await;
        state.send(YearListAction::AddYear(2024), &client).await;

        let values: Vec<i32> = state.years.iter().map(|y| y.year).collect();
        assert_eq!(values, vec![2024, 2026]);
    }

    #[tokio::test]
    async fn test_add_invalid_year_sets_error() {
        let client = client();
        let mut state = YearListState::default();

        state.send(YearListAction::AddYear(0), &client).await;

        assert!(state.years.is_empty());
        assert!(state.error_message.is_some());
    }

    #[tokio::test]
    async fn test_delete_by_offset() {
        let client = client();
        let mut state = YearListState::default();
        for value in [2023, 2024, 2025] {
            state.send(YearListAction::AddYear(value), &client).await;
        }

        state.send(YearListAction::Delete(vec![0, 2, 9]), &client).await;

        assert_eq!(state.years.len(), 1);
        assert_eq!(state.years[0].year, 2024);
    }
}
