//! Shared test utilities for unit tests
//!
//! Integration tests (in tests/) cannot access this module because it's
//! marked with #[cfg(test)]. They have their own copy in tests/common/mod.rs.

use crate::types::{CostRecord, DailyDate, ServiceName};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a decimal literal
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Build a record from string parts
pub fn record(date: &str, service: &str, cost: &str) -> CostRecord {
    CostRecord::new(
        DailyDate::parse(date).unwrap(),
        ServiceName::new(service),
        dec(cost),
    )
}

/// Three records spanning two days and two services
///
/// Total 27.00, average daily 13.50, EC2 22.00, S3 5.00.
pub fn sample_records() -> Vec<CostRecord> {
    vec![
        record("2024-01-01", "EC2", "10.00"),
        record("2024-01-01", "S3", "5.00"),
        record("2024-01-02", "EC2", "12.00"),
    ]
}
