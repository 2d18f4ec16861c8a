//! Month grid and summary header formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::services::MonthSummary;

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    name: String,
    #[tabled(rename = "Start")]
    starting: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expense: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "End")]
    ending: String,
    #[tabled(rename = "Entries")]
    entries: usize,
}

/// Twelve-month overview of a year
pub fn format_month_grid(summaries: &[MonthSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No months found.".to_string();
    }

    let symbol = settings.currency_symbol.as_str();
    let rows = summaries.iter().map(|s| MonthRow {
        name: s.month.name().to_string(),
        starting: s.totals.starting_balance.format_with_symbol(symbol),
        income: s.totals.total_income.format_with_symbol(symbol),
        expense: s.totals.total_expense.format_with_symbol(symbol),
        savings: s.totals.total_savings.format_with_symbol(symbol),
        ending: s.totals.ending_balance.format_with_symbol(symbol),
        entries: s.entry_count,
    });

    let mut output = format!("{}\n", summaries[0].period.year());
    output.push_str(
        &Table::new(rows)
            .with(Style::sharp())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string(),
    );
    output
}

/// Header block shown above a month's entries
pub fn format_month_summary(summary: &MonthSummary, settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let totals = &summary.totals;

    let mut output = String::new();
    output.push_str(&format!("{}\n", summary.title()));
    output.push_str(&format!(
        "Starting balance: {:>14}\n",
        totals.starting_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Income:           {:>14}\n",
        totals.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Expenses:         {:>14}\n",
        totals.total_expense.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Savings:          {:>14}\n",
        totals.total_savings.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Net balance:      {:>14}\n",
        totals.net_balance.format_with_symbol(symbol)
    ));
    output
}
