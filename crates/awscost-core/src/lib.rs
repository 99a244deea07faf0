//! Core types, traits, and utilities for awscost
//!
//! This crate provides the cost record model, the Cost Explorer response
//! model and its flattening into records, the aggregations behind every
//! report, and the `CostSource` trait implemented by data providers.

pub mod aggregation;
pub mod aggregation_types;
pub mod error;
pub mod filters;
pub mod provider;
pub mod report;
pub mod response;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{AwsCostError, Result};
pub use types::{CostRecord, DailyDate, DateRange, ServiceName};
