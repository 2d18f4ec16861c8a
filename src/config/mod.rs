//! Configuration module
//!
//! - Platform path resolution for the data directory
//! - User settings persistence (`config.json`)

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
