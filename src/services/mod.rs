//! Service layer
//!
//! The rollover engine and the data access client built on top of the
//! storage layer.

pub mod client;
pub mod clock;
pub mod rollover;

pub use client::{BudgetClient, BudgetSnapshot, MonthSummary};
pub use clock::{Clock, FixedClock, SystemClock};
pub use rollover::{CreationPath, RolloverPolicy};
