//! Display formatting for terminal output
//!
//! Tables are rendered with `tabled`; amounts use the configured currency
//! symbol and dates the configured format.

pub mod entry;
pub mod month;
pub mod year;

pub use entry::{format_entry_details, format_entry_table};
pub use month::{format_month_grid, format_month_summary};
pub use year::format_year_list;
