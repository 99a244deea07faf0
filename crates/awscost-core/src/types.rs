//! Core domain types for awscost
//!
//! This module contains the fundamental types used throughout the awscost
//! crates: service names, calendar days, query date ranges, and the flat
//! cost record produced from a Cost Explorer response.

use crate::error::{AwsCostError, Result};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strongly-typed AWS service name
///
/// Wraps the `SERVICE` dimension key returned by Cost Explorer, such as
/// `Amazon Elastic Compute Cloud - Compute`.
///
/// # Examples
/// ```
/// use awscost_core::types::ServiceName;
///
/// let service = ServiceName::new("Amazon Simple Storage Service");
/// assert_eq!(service.as_str(), "Amazon Simple Storage Service");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    /// Create a new ServiceName from any string-like type
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Calendar day a cost belongs to
///
/// # Examples
/// ```
/// use awscost_core::types::DailyDate;
/// use chrono::NaiveDate;
///
/// let day = DailyDate::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
/// assert_eq!(day.format("%Y-%m-%d"), "2024-01-15");
/// assert_eq!(day.month_key(), "2024-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyDate(NaiveDate);

impl DailyDate {
    /// Create a new DailyDate
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse an ISO 8601 `YYYY-MM-DD` date
    pub fn parse(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| AwsCostError::InvalidDate(format!("'{s}', expected YYYY-MM-DD")))
    }

    /// Get the inner NaiveDate
    pub fn inner(&self) -> &NaiveDate {
        &self.0
    }

    /// Format with a chrono format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }

    /// Calendar month the day falls in, as `YYYY-MM`
    pub fn month_key(&self) -> String {
        self.format("%Y-%m")
    }
}

impl fmt::Display for DailyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Date range of a Cost Explorer query
///
/// The end date is handed to the API unchanged; Cost Explorer treats it as
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting an end that precedes the start
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(AwsCostError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `days` days leading up to `today`
    ///
    /// # Examples
    /// ```
    /// use awscost_core::types::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
    /// let range = DateRange::last_days(today, 7);
    /// assert_eq!(range.start_str(), "2024-03-01");
    /// assert_eq!(range.end_str(), "2024-03-08");
    /// ```
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today - Duration::days(i64::from(days)),
            end: today,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start as `YYYY-MM-DD`
    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// End as `YYYY-MM-DD`
    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_str(), self.end_str())
    }
}

/// One day's unblended cost for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRecord {
    pub date: DailyDate,
    pub service: ServiceName,
    pub cost: Decimal,
}

impl CostRecord {
    pub fn new(date: DailyDate, service: ServiceName, cost: Decimal) -> Self {
        Self {
            date,
            service,
            cost,
        }
    }
}
