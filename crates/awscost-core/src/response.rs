//! Cost Explorer `GetCostAndUsage` response model
//!
//! Mirrors the JSON shape returned by the API (and by
//! `aws ce get-cost-and-usage --output json`), so a response can come from
//! the SDK or from a saved file. [`CostAndUsage::to_records`] flattens the
//! nested per-day, per-service groups into [`CostRecord`]s.
//!
//! # Examples
//!
//! ```
//! use awscost_core::response::CostAndUsage;
//!
//! let json = r#"{
//!   "ResultsByTime": [{
//!     "TimePeriod": {"Start": "2024-01-01", "End": "2024-01-02"},
//!     "Groups": [{
//!       "Keys": ["Amazon Simple Storage Service"],
//!       "Metrics": {"UnblendedCost": {"Amount": "5.00", "Unit": "USD"}}
//!     }]
//!   }]
//! }"#;
//!
//! let response: CostAndUsage = serde_json::from_str(json).unwrap();
//! let records = response.to_records().unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].service.as_str(), "Amazon Simple Storage Service");
//! ```

use crate::error::{AwsCostError, Result};
use crate::types::{CostRecord, DailyDate, ServiceName};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Metric requested from Cost Explorer
pub const UNBLENDED_COST: &str = "UnblendedCost";
/// Dimension costs are grouped by
pub const SERVICE_DIMENSION: &str = "SERVICE";

/// Top-level response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAndUsage {
    #[serde(default)]
    pub results_by_time: Vec<ResultByTime>,
    /// Present when the API truncated the result; never followed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Costs for one time bucket (one day at DAILY granularity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultByTime {
    pub time_period: TimePeriod,
    #[serde(default)]
    pub groups: Vec<CostGroup>,
    #[serde(default)]
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimePeriod {
    pub start: String,
    pub end: String,
}

/// Costs for one group-by key within a time bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostGroup {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub metrics: HashMap<String, MetricValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    pub amount: String,
    #[serde(default)]
    pub unit: String,
}

impl CostAndUsage {
    /// Parse a response from its JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Number of (day, group) pairs in the response
    pub fn group_count(&self) -> usize {
        self.results_by_time.iter().map(|r| r.groups.len()).sum()
    }

    /// Flatten the response into one record per (day, service group)
    ///
    /// Order follows the response: days in order, groups in order within a
    /// day. Any malformed date, missing key, missing metric or unparseable
    /// amount fails the whole operation.
    pub fn to_records(&self) -> Result<Vec<CostRecord>> {
        let mut records = Vec::with_capacity(self.group_count());

        for result in &self.results_by_time {
            let date = DailyDate::parse(&result.time_period.start)?;

            for group in &result.groups {
                let service = group.keys.first().ok_or_else(|| {
                    AwsCostError::MissingField(format!(
                        "Keys of a group on {}",
                        result.time_period.start
                    ))
                })?;

                let metric = group.metrics.get(UNBLENDED_COST).ok_or_else(|| {
                    AwsCostError::MissingField(format!(
                        "{UNBLENDED_COST} for {service} on {}",
                        result.time_period.start
                    ))
                })?;

                let cost = parse_amount(&metric.amount).ok_or_else(|| {
                    AwsCostError::InvalidAmount {
                        date: result.time_period.start.clone(),
                        service: service.clone(),
                        amount: metric.amount.clone(),
                    }
                })?;

                records.push(CostRecord::new(date, ServiceName::new(service.as_str()), cost));
            }
        }

        Ok(records)
    }
}

/// Parse a string-encoded amount, accepting scientific notation
///
/// # Examples
/// ```
/// use awscost_core::response::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("12.50"), Some(Decimal::new(1250, 2)));
/// assert_eq!(parse_amount("1.5E-7"), Some(Decimal::new(15, 8)));
/// assert_eq!(parse_amount("n/a"), None);
/// ```
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.contains(['e', 'E']) {
        Decimal::from_scientific(raw).ok()
    } else {
        Decimal::from_str(raw).ok()
    }
}
