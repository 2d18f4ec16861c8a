//! Entry list and detail formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Entry;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn signed_amount(entry: &Entry, symbol: &str) -> String {
    let effect = entry.effect();
    let sign = if effect.is_negative() { "" } else { "+" };
    format!("{}{}", sign, effect.format_with_symbol(symbol))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Entries as a numbered table; the numbers are the offsets `entry delete` accepts
pub fn format_entry_table(entries: &[Entry], settings: &Settings) -> String {
    if entries.is_empty() {
        return "No entries.".to_string();
    }

    let symbol = settings.currency_symbol.as_str();
    let rows = entries.iter().enumerate().map(|(i, e)| {
        let carry = if e.is_carryover { " ↻" } else { "" };
        EntryRow {
            position: i + 1,
            date: e.date.format(&settings.date_format).to_string(),
            title: format!("{}{}", truncate(&e.title, 30), carry),
            kind: e.kind.to_string(),
            amount: signed_amount(e, symbol),
            note: truncate(&e.note, 24),
        }
    });

    Table::new(rows)
        .with(Style::sharp())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()))
        .to_string()
}

pub fn format_entry_details(entry: &Entry, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:     {}\n", entry.id));
    output.push_str(&format!("Title:     {}\n", entry.title));
    output.push_str(&format!(
        "Date:      {}\n",
        entry.date.format(&settings.date_format)
    ));
    output.push_str(&format!("Type:      {}\n", entry.kind));
    output.push_str(&format!(
        "Amount:    {}\n",
        signed_amount(entry, &settings.currency_symbol)
    ));

    if !entry.note.is_empty() {
        output.push_str(&format!("Note:      {}\n", entry.note));
    }
    if entry.is_carryover {
        output.push_str("Carryover: yes\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, MonthId, Money, NewEntry};

    fn entry(title: &str, kind: EntryKind) -> Entry {
        Entry::from_new(MonthId::new(), NewEntry::new(title, Money::from_cents(12_050), kind))
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_entry_table(&[], &Settings::default()), "No entries.");
    }

    #[test]
    fn test_table_signs_follow_kind() {
        let entries = vec![entry("Salary", EntryKind::Income), entry("Groceries", EntryKind::Expense)];
        let output = format_entry_table(&entries, &Settings::default());

        assert!(output.contains("+$120.50"));
        assert!(output.contains("-$120.50"));
        assert!(output.contains("Groceries"));
    }

    #[test]
    fn test_truncate_long_title() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn test_details_include_note_and_carryover() {
        let mut e = entry("Rent", EntryKind::Expense);
        e.note = "June".into();
        e.is_carryover = true;

        let output = format_entry_details(&e, &Settings::default());
        assert!(output.contains("Note:      June"));
        assert!(output.contains("Carryover: yes"));
    }
}
