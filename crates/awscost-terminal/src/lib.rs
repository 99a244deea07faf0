//! Output for awscost
//!
//! This crate provides table and JSON formatters for terminal output,
//! plotters-based charts (PNG for the chart command, SVG for the
//! dashboard), and CSV export of cost records.

pub mod chart;
pub mod export;
pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, format_currency, get_formatter};
