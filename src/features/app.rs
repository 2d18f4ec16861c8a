//! Top-level navigation
//!
//! The year list is always at the root; drilled-in screens live on `path`,
//! topmost last.

use async_trait::async_trait;

use crate::models::{Month, MonthId, YearId};
use crate::services::{BudgetClient, Clock};
use crate::storage::BudgetStore;

use super::add_entry::{AddEntryAction, AddEntryState};
use super::month_detail::{MonthDetailAction, MonthDetailState};
use super::month_grid::{MonthGridAction, MonthGridState};
use super::year_list::{YearListAction, YearListState};
use super::Feature;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    MonthGrid(MonthGridState),
    MonthDetail(MonthDetailState),
    AddEntry(AddEntryState),
}

/// An action addressed to the topmost screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    MonthGrid(MonthGridAction),
    MonthDetail(MonthDetailAction),
    AddEntry(AddEntryAction),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub year_list: YearListState,
    pub path: Vec<Screen>,
    pub is_bootstrapped: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    AppStarted,
    BootstrapFinished(Result<Month, String>),
    YearList(YearListAction),
    Screen(ScreenAction),
    OpenMonthGrid(YearId),
    OpenMonth(MonthId),
    /// Close the topmost screen
    Pop,
}

impl AppState {
    pub fn top(&self) -> Option<&Screen> {
        self.path.last()
    }

    /// Forward an action to the topmost screen if it is of the matching kind
    async fn forward<S: BudgetStore>(
        &mut self,
        action: ScreenAction,
        client: &BudgetClient<S>,
    ) -> Option<AppAction> {
        match (self.path.last_mut(), action) {
            (Some(Screen::MonthGrid(state)), ScreenAction::MonthGrid(action)) => state
                .reduce(action, client)
                .await
                .map(|next| AppAction::Screen(ScreenAction::MonthGrid(next))),
            (Some(Screen::MonthDetail(state)), ScreenAction::MonthDetail(action)) => state
                .reduce(action, client)
                .await
                .map(|next| AppAction::Screen(ScreenAction::MonthDetail(next))),
            (Some(Screen::AddEntry(state)), ScreenAction::AddEntry(action)) => state
                .reduce(action, client)
                .await
                .map(|next| AppAction::Screen(ScreenAction::AddEntry(next))),
            (_, action) => {
                tracing::debug!(?action, "dropping action for a screen that is not on top");
                None
            }
        }
    }

    fn push_month_detail(&mut self, month_id: MonthId) -> Option<AppAction> {
        self.path.push(Screen::MonthDetail(MonthDetailState::new(month_id)));
        Some(AppAction::Screen(ScreenAction::MonthDetail(
            MonthDetailAction::Load,
        )))
    }
}

#[async_trait]
impl Feature for AppState {
    type Action = AppAction;

    async fn reduce<S: BudgetStore>(
        &mut self,
        action: AppAction,
        client: &BudgetClient<S>,
    ) -> Option<AppAction> {
        match action {
            AppAction::AppStarted => {
                self.is_bootstrapped = false;
                let result = match client.bootstrap_current_month().await {
                    Ok(_) => client.fetch_current_month().await,
                    Err(e) => Err(e),
                };
                Some(AppAction::BootstrapFinished(
                    result.map_err(|e| e.to_string()),
                ))
            }
            AppAction::BootstrapFinished(Ok(month)) => {
                self.is_bootstrapped = true;
                self.error_message = None;
                self.push_month_detail(month.id)
            }
            AppAction::BootstrapFinished(Err(message)) => {
                self.is_bootstrapped = true;
                tracing::error!(error = %message, "bootstrap failed");
                self.error_message = Some(message);
                None
            }
            AppAction::YearList(YearListAction::OpenMonthGrid(year_id)) => {
                Some(AppAction::OpenMonthGrid(year_id))
            }
            AppAction::YearList(action) => self
                .year_list
                .reduce(action, client)
                .await
                .map(AppAction::YearList),
            AppAction::Screen(ScreenAction::MonthGrid(MonthGridAction::OpenMonth(id))) => {
                Some(AppAction::OpenMonth(id))
            }
            AppAction::Screen(ScreenAction::MonthDetail(MonthDetailAction::AddTapped)) => {
                if let Some(Screen::MonthDetail(detail)) = self.path.last() {
                    let form = AddEntryState::new(detail.month_id, client.clock().now());
                    self.path.push(Screen::AddEntry(form));
                }
                None
            }
            AppAction::Screen(ScreenAction::AddEntry(AddEntryAction::Saved(entry))) => {
                if let Some(Screen::AddEntry(form)) = self.path.last_mut() {
                    form.saved = Some(entry);
                }
                self.path.pop();
                match self.path.last() {
                    Some(Screen::MonthDetail(_)) => Some(AppAction::Screen(
                        ScreenAction::MonthDetail(MonthDetailAction::Load),
                    )),
                    _ => None,
                }
            }
            AppAction::Screen(action) => self.forward(action, client).await,
            AppAction::OpenMonthGrid(year_id) => {
                self.path.push(Screen::MonthGrid(MonthGridState::new(year_id)));
                Some(AppAction::Screen(ScreenAction::MonthGrid(
                    MonthGridAction::Load,
                )))
            }
            AppAction::OpenMonth(month_id) => self.push_month_detail(month_id),
            AppAction::Pop => {
                self.path.pop();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BudgetError, BudgetResult};
    use crate::models::{Entry, EntryId, EntryKind, Money, Year};
    use crate::services::FixedClock;
    use crate::storage::{EntryQuery, Storage};

    fn client() -> BudgetClient<Storage> {
        BudgetClient::new(Storage::in_memory(), FixedClock::on(2025, 8, 20))
    }

    #[tokio::test]
    async fn test_app_started_opens_current_month() {
        let client = client();
        let mut app = AppState::default();

        app.send(AppAction::AppStarted, &client).await;

        assert!(app.is_bootstrapped);
        assert_eq!(app.path.len(), 1);
        let Some(Screen::MonthDetail(detail)) = app.top() else {
            panic!("expected month detail on top");
        };
        assert_eq!(detail.summary.as_ref().unwrap().title(), "August 2025");
    }

    #[tokio::test]
    async fn test_add_entry_flow_returns_to_detail() {
        let client = client();
        let mut app = AppState::default();
        app.send(AppAction::AppStarted, &client).await;

        app.send(AppAction::Screen(ScreenAction::MonthDetail(MonthDetailAction::AddTapped)), &client)
            .await;
        assert!(matches!(app.top(), Some(Screen::AddEntry(_))));

        for action in [
            AddEntryAction::SetTitle("Salary".into()),
            AddEntryAction::SetAmount(Money::from_major(3000)),
            AddEntryAction::SetKind(EntryKind::Income),
            AddEntryAction::SaveTapped,
        ] {
            app.send(AppAction::Screen(ScreenAction::AddEntry(action)), &client).await;
        }

        assert_eq!(app.path.len(), 1);
        let Some(Screen::MonthDetail(detail)) = app.top() else {
            panic!("expected month detail on top");
        };
        assert_eq!(detail.entries.len(), 1);
        assert_eq!(
            detail.summary.as_ref().unwrap().totals.ending_balance,
            Money::from_major(3000)
        );
    }

    #[tokio::test]
    async fn test_year_list_drill_down() {
        let client = client();
        let mut app = AppState::default();
        app.send(AppAction::YearList(YearListAction::AddYear(2024)), &client).await;
        let year_id = app.year_list.years[0].id;

        app.send(AppAction::YearList(YearListAction::OpenMonthGrid(year_id)), &client).await;
        let Some(Screen::MonthGrid(grid)) = app.top() else {
            panic!("expected month grid on top");
        };
        assert_eq!(grid.months.len(), 12);
        let march = grid.months[2].month.id;

        app.send(AppAction::Screen(ScreenAction::MonthGrid(MonthGridAction::OpenMonth(march))), &client)
            .await;
        assert_eq!(app.path.len(), 2);
        assert!(matches!(app.top(), Some(Screen::MonthDetail(d)) if d.month_id == march));

        app.send(AppAction::Pop, &client).await;
        assert!(matches!(app.top(), Some(Screen::MonthGrid(_))));
    }

    /// A store whose every call fails
    struct BrokenStore;

    #[async_trait]
    impl BudgetStore for BrokenStore {
        async fn years(&self) -> BudgetResult<Vec<Year>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn year(&self, _: YearId) -> BudgetResult<Option<Year>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn year_by_value(&self, _: i32) -> BudgetResult<Option<Year>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn insert_year(&self, _: Year) -> BudgetResult<()> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn remove_year(&self, _: YearId) -> BudgetResult<Option<Year>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn months_of_year(&self, _: YearId) -> BudgetResult<Vec<Month>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn all_months(&self) -> BudgetResult<Vec<Month>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn month(&self, _: MonthId) -> BudgetResult<Option<Month>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn month_in_slot(&self, _: YearId, _: u32) -> BudgetResult<Option<Month>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn insert_month(&self, _: Month) -> BudgetResult<()> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn remove_month(&self, _: MonthId) -> BudgetResult<Option<Month>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn entries(&self, _: &EntryQuery) -> BudgetResult<Vec<Entry>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn all_entries(&self) -> BudgetResult<Vec<Entry>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn insert_entry(&self, _: Entry) -> BudgetResult<()> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn remove_entry(&self, _: EntryId) -> BudgetResult<Option<Entry>> {
            Err(BudgetError::Storage("offline".into()))
        }
        async fn commit(&self) -> BudgetResult<()> {
            Err(BudgetError::Storage("offline".into()))
        }
    }

    #[tokio::test]
    async fn test_bootstrap_failure_is_recorded() {
        let client = BudgetClient::new(BrokenStore, FixedClock::on(2025, 8, 20));
        let mut app = AppState::default();

        app.send(AppAction::AppStarted, &client).await;

        assert!(app.is_bootstrapped);
        assert!(app.path.is_empty());
        assert_eq!(app.error_message.as_deref(), Some("Storage error: offline"));
    }
}
