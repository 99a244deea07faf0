//! Common test utilities and helpers for awscost tests
//!
//! Builders for cost records and saved Cost Explorer responses, plus
//! in-memory `CostSource` implementations.
#![allow(dead_code)]

use async_trait::async_trait;
use awscost::{AwsCostError, CostRecord, DailyDate, DateRange, Result, ServiceName};
use awscost_core::provider::CostSource;
use awscost_core::response::CostAndUsage;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Common service names as Cost Explorer reports them
pub const EC2: &str = "Amazon Elastic Compute Cloud - Compute";
pub const S3: &str = "Amazon Simple Storage Service";
pub const LAMBDA: &str = "AWS Lambda";

/// Three groups over two days: EC2 10.00 + S3 5.00, then EC2 12.00
pub const SAMPLE_RESPONSE: &str = r#"{
  "GroupDefinitions": [{"Type": "DIMENSION", "Key": "SERVICE"}],
  "ResultsByTime": [
    {
      "TimePeriod": {"Start": "2024-01-01", "End": "2024-01-02"},
      "Total": {},
      "Groups": [
        {"Keys": ["Amazon Elastic Compute Cloud - Compute"], "Metrics": {"UnblendedCost": {"Amount": "10.00", "Unit": "USD"}}},
        {"Keys": ["Amazon Simple Storage Service"], "Metrics": {"UnblendedCost": {"Amount": "5.00", "Unit": "USD"}}}
      ],
      "Estimated": false
    },
    {
      "TimePeriod": {"Start": "2024-01-02", "End": "2024-01-03"},
      "Total": {},
      "Groups": [
        {"Keys": ["Amazon Elastic Compute Cloud - Compute"], "Metrics": {"UnblendedCost": {"Amount": "12.00", "Unit": "USD"}}}
      ],
      "Estimated": true
    }
  ],
  "DimensionValueAttributes": []
}"#;

/// A response whose days carry no groups
pub const EMPTY_RESPONSE: &str = r#"{
  "ResultsByTime": [
    {"TimePeriod": {"Start": "2024-01-01", "End": "2024-01-02"}, "Total": {}, "Groups": [], "Estimated": true}
  ]
}"#;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).unwrap()
}

/// Builder for creating test CostRecord instances
pub struct CostRecordBuilder {
    date: String,
    service: String,
    cost: Decimal,
}

impl CostRecordBuilder {
    pub fn new() -> Self {
        Self {
            date: "2024-01-01".to_string(),
            service: EC2.to_string(),
            cost: Decimal::ONE,
        }
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn with_service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    pub fn with_cost(mut self, cost: &str) -> Self {
        self.cost = dec(cost);
        self
    }

    pub fn build(self) -> CostRecord {
        CostRecord::new(
            DailyDate::parse(&self.date).unwrap(),
            ServiceName::new(self.service),
            self.cost,
        )
    }
}

impl Default for CostRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for saved `GetCostAndUsage` responses
#[derive(Default)]
pub struct ResponseBuilder {
    days: Vec<serde_json::Value>,
    next_page_token: Option<String>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one day with `(service, amount)` groups in order
    pub fn day(mut self, start: &str, groups: &[(&str, &str)]) -> Self {
        let end = (date(start) + chrono::Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        let groups: Vec<_> = groups
            .iter()
            .map(|(service, amount)| {
                json!({
                    "Keys": [service],
                    "Metrics": {"UnblendedCost": {"Amount": amount, "Unit": "USD"}},
                })
            })
            .collect();
        self.days.push(json!({
            "TimePeriod": {"Start": start, "End": end},
            "Groups": groups,
            "Estimated": false,
        }));
        self
    }

    pub fn with_next_page_token(mut self, token: &str) -> Self {
        self.next_page_token = Some(token.to_string());
        self
    }

    pub fn to_json(&self) -> String {
        let mut body = json!({ "ResultsByTime": self.days });
        if let Some(token) = &self.next_page_token {
            body["NextPageToken"] = json!(token);
        }
        body.to_string()
    }
}

/// Write a response fixture into `dir` and return its path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Source serving a fixed JSON body
pub struct StaticSource(pub String);

impl StaticSource {
    pub fn sample() -> Self {
        Self(SAMPLE_RESPONSE.to_string())
    }
}

#[async_trait]
impl CostSource for StaticSource {
    async fn fetch(&self, _range: &DateRange) -> Result<CostAndUsage> {
        CostAndUsage::from_json(&self.0)
    }

    fn describe(&self) -> String {
        "static fixture".to_string()
    }
}

/// Source failing like an API call without credentials
pub struct FailingSource;

#[async_trait]
impl CostSource for FailingSource {
    async fn fetch(&self, _range: &DateRange) -> Result<CostAndUsage> {
        Err(AwsCostError::Api(
            "AccessDeniedException: User is not authorized to perform ce:GetCostAndUsage"
                .to_string(),
        ))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}
