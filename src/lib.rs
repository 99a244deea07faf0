//! awscost - Report AWS costs per service from Cost Explorer
//!
//! The library side of the `awscost` binary:
//! - `cli` parses arguments and date ranges
//! - `pipeline` picks the cost source and runs fetches behind a spinner
//! - `dashboard` serves the HTML dashboard, CSV download and JSON API
//!
//! Fetching, flattening and aggregation live in `awscost-core` and
//! `awscost-provider-aws`; rendering lives in `awscost-terminal`.
//!
//! # Examples
//!
//! ```no_run
//! use awscost::pipeline::load_report;
//! use awscost_core::filters::RecordFilter;
//! use awscost_core::types::DateRange;
//! use awscost_provider_aws::JsonFileSource;
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> awscost::Result<()> {
//!     let source = JsonFileSource::new("costs.json");
//!     let range = DateRange::last_days(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(), 7);
//!     let outcome = load_report(&source, range, &RecordFilter::new(), false).await?;
//!     println!("empty: {}", outcome.is_empty());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod dashboard;
pub mod pipeline;

// Re-export commonly used types
pub use awscost_core::{AwsCostError, CostRecord, DailyDate, DateRange, Result, ServiceName};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
