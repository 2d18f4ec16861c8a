//! Month detail screen: summary header plus the entry list

use async_trait::async_trait;

use crate::error::BudgetResult;
use crate::models::{Entry, MonthId};
use crate::services::{BudgetClient, MonthSummary};
use crate::storage::{BudgetStore, EntrySort};

use super::{pick, Feature};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthDetailState {
    pub month_id: MonthId,
    pub summary: Option<MonthSummary>,
    pub entries: Vec<Entry>,
    pub sort: EntrySort,
    pub error_message: Option<String>,
}

impl MonthDetailState {
    pub fn new(month_id: MonthId) -> Self {
        Self::sorted(month_id, EntrySort::default())
    }

    pub fn sorted(month_id: MonthId, sort: EntrySort) -> Self {
        Self {
            month_id,
            summary: None,
            entries: Vec::new(),
            sort,
            error_message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthDetailAction {
    Load,
    MonthLoaded(Result<(MonthSummary, Vec<Entry>), String>),
    SetSort(EntrySort),
    /// Delete the entries at these list positions
    Delete(Vec<usize>),
    /// Handled by the app, which pushes the add-entry form
    AddTapped,
}

async fn load<S: BudgetStore>(
    client: &BudgetClient<S>,
    month_id: MonthId,
    sort: EntrySort,
) -> BudgetResult<(MonthSummary, Vec<Entry>)> {
    let summary = client.month_summary(month_id).await?;
    let entries = client.entries_for_month(month_id, sort).await?;
    Ok((summary, entries))
}

#[async_trait]
impl Feature for MonthDetailState {
    type Action = MonthDetailAction;

    async fn reduce<S: BudgetStore>(
        &mut self,
        action: MonthDetailAction,
        client: &BudgetClient<S>,
    ) -> Option<MonthDetailAction> {
        match action {
            MonthDetailAction::Load => Some(MonthDetailAction::MonthLoaded(
                load(client, self.month_id, self.sort)
                    .await
                    .map_err(|e| e.to_string()),
            )),
            MonthDetailAction::MonthLoaded(Ok((summary, entries))) => {
                self.summary = Some(summary);
                self.entries = entries;
                self.error_message = None;
                None
            }
            MonthDetailAction::MonthLoaded(Err(message)) => {
                self.error_message = Some(message);
                None
            }
            MonthDetailAction::SetSort(sort) => {
                self.sort = sort;
                Some(MonthDetailAction::Load)
            }
            MonthDetailAction::Delete(offsets) => {
                let ids = pick(&self.entries, &offsets, |e| e.id);
                if let Err(e) = client.delete_entries(&ids).await {
                    self.error_message = Some(e.to_string());
                }
                Some(MonthDetailAction::Load)
            }
            MonthDetailAction::AddTapped => None,
        }
    }
}
