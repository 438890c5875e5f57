pub mod billing;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod report;

#[cfg(feature = "tui")]
pub mod ui;
pub mod utils;
