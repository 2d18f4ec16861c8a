//! Screen state machines
//!
//! Each screen is a plain state struct plus an action enum. `reduce` applies
//! one action, possibly talking to the client, and may schedule a follow-up
//! action; `send` keeps reducing until nothing is left to do.

pub mod add_entry;
pub mod app;
pub mod month_detail;
pub mod month_grid;
pub mod year_list;

pub use add_entry::{AddEntryAction, AddEntryState};
pub use app::{AppAction, AppState, Screen, ScreenAction};
pub use month_detail::{MonthDetailAction, MonthDetailState};
pub use month_grid::{MonthGridAction, MonthGridState};
pub use year_list::{YearListAction, YearListState};

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::services::BudgetClient;
use crate::storage::BudgetStore;

#[async_trait]
pub trait Feature: Send {
    type Action: Send;

    /// Apply one action, returning the next action to run, if any
    async fn reduce<S: BudgetStore>(
        &mut self,
        action: Self::Action,
        client: &BudgetClient<S>,
    ) -> Option<Self::Action>;

    /// Run an action and every follow-up it schedules, in order
    async fn send<S: BudgetStore>(&mut self, action: Self::Action, client: &BudgetClient<S>)
    where
        Self: Sized,
    {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            if let Some(next) = self.reduce(action, client).await {
                queue.push_back(next);
            }
        }
    }
}

/// Items at the given list offsets; offsets past the end are ignored
pub(crate) fn pick<T, K>(items: &[T], offsets: &[usize], key: impl Fn(&T) -> K) -> Vec<K> {
    offsets
        .iter()
        .filter_map(|&i| items.get(i))
        .map(key)
        .collect()
}
