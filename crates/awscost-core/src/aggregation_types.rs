//! Aggregation data types for awscost
//!
//! Pure data structures produced by the aggregator. None of them is stored;
//! they are rebuilt from the record set on every run.

use crate::types::{DailyDate, ServiceName};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summed cost for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCost {
    /// Year and month in YYYY-MM format
    pub month: String,
    /// Total cost for the month
    pub total_cost: Decimal,
    /// Number of distinct days with records in this month
    pub active_days: usize,
}

/// Summed cost for one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCost {
    pub service: ServiceName,
    pub total_cost: Decimal,
}

/// Summed cost for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCost {
    pub date: DailyDate,
    pub total_cost: Decimal,
    /// Number of service records on that day
    pub services: usize,
}

/// Headline figures shown as summary cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of all record costs
    pub total_cost: Decimal,
    /// Mean of the per-day sums
    pub average_daily_cost: Decimal,
    /// Service with the highest summed cost
    pub top_service: ServiceCost,
    /// Distinct days present
    pub days: usize,
    /// Distinct services present
    pub services: usize,
    /// Number of records summarized
    pub records: usize,
}

/// Day × service matrix of costs, missing cells filled with zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyServicePivot {
    /// Row labels in ascending order
    pub dates: Vec<DailyDate>,
    /// One column per service, each with `dates.len()` values
    pub series: Vec<(ServiceName, Vec<Decimal>)>,
}

impl DailyServicePivot {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Largest single cell, or zero for an empty pivot
    pub fn max_value(&self) -> Decimal {
        self.series
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}
