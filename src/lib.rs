//! family-budget - a household budget ledger organized by year and month
//!
//! Every calendar month has a starting balance and a list of income, expense
//! and saving entries. When the current month is first opened, its starting
//! balance is carried over from the previous month's ending balance.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Years, months, entries, money and calendar periods
//! - `storage`: The `BudgetStore` trait and its JSON-file implementation
//! - `services`: Rollover engine and the serialized data access client
//! - `features`: Screen state machines driven by actions
//! - `audit`: Append-only create/delete log
//! - `display`: Terminal tables
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use family_budget::config::{BudgetPaths, Settings};
//! use family_budget::services::{BudgetClient, SystemClock};
//! use family_budget::storage::Storage;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let client = BudgetClient::new(Storage::open(paths)?, SystemClock)
//!     .with_policy(settings.rollover_policy);
//! let month = client.bootstrap_current_month().await?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod features;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
