//! Year list formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Year;

#[derive(Tabled)]
struct YearRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn format_year_list(years: &[Year]) -> String {
    if years.is_empty() {
        return "No years yet. Add one with `budget year add <YEAR>`.".to_string();
    }

    let rows = years.iter().enumerate().map(|(i, y)| YearRow {
        position: i + 1,
        year: y.year,
        id: y.id.to_string(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert!(format_year_list(&[]).starts_with("No years yet"));
    }

    #[test]
    fn test_rows_in_order() {
        let years = vec![Year::new(2024), Year::new(2025)];
        let output = format_year_list(&years);
        let first = output.find("2024").unwrap();
        let second = output.find("2025").unwrap();
        assert!(first < second);
        assert!(output.contains("Year"));
    }
}
