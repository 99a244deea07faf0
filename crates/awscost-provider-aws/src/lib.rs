//! AWS Cost Explorer provider for awscost
//!
//! This crate implements the `CostSource` trait against the live Cost
//! Explorer API and against saved `GetCostAndUsage` JSON responses.

pub mod conversion;
pub mod data_loader;
pub mod file_loader;

pub use data_loader::{CostExplorerSource, SourceOptions};
pub use file_loader::JsonFileSource;
