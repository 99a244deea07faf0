//! Report assembly
//!
//! Runs the pipeline shared by every entry point: fetch, flatten, filter,
//! aggregate. Empty data is an outcome, not an error.

use crate::aggregation::Aggregator;
use crate::aggregation_types::{DailyCost, MonthlyCost, ServiceCost, Summary};
use crate::error::Result;
use crate::filters::RecordFilter;
use crate::provider::CostSource;
use crate::types::{CostRecord, DateRange, ServiceName};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// Why a run produced nothing to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The query returned no cost records
    NoCostData,
    /// Records exist but none for the selected service
    UnknownService(ServiceName),
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoCostData => {
                write!(f, "No cost data available for the selected date range.")
            }
            EmptyReason::UnknownService(service) => {
                write!(f, "No cost data for service '{service}' in the selected date range.")
            }
        }
    }
}

/// Everything the presenters render for one run
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    pub range: DateRange,
    /// Service the records were filtered to, if any
    pub service_filter: Option<ServiceName>,
    /// Services present before filtering, in order of first appearance
    pub services: Vec<ServiceName>,
    /// Filtered records in response order
    pub records: Vec<CostRecord>,
    pub summary: Summary,
    pub monthly: Vec<MonthlyCost>,
    pub breakdown: Vec<ServiceCost>,
    pub daily: Vec<DailyCost>,
}

/// Result of running the pipeline
#[derive(Debug, Clone)]
pub enum ReportOutcome {
    Empty {
        reason: EmptyReason,
        /// Services present before filtering (empty for `NoCostData`)
        services: Vec<ServiceName>,
    },
    Ready(Box<CostReport>),
}

impl ReportOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, ReportOutcome::Empty { .. })
    }

    /// Services available to a selector regardless of outcome
    pub fn services(&self) -> &[ServiceName] {
        match self {
            ReportOutcome::Empty { services, .. } => services,
            ReportOutcome::Ready(report) => &report.services,
        }
    }
}

/// Distinct services in order of first appearance
pub fn unique_services(records: &[CostRecord]) -> Vec<ServiceName> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(&r.service))
        .map(|r| r.service.clone())
        .collect()
}

impl CostReport {
    /// Filter and aggregate an already flattened record set
    pub fn build(range: DateRange, records: Vec<CostRecord>, filter: &RecordFilter) -> ReportOutcome {
        if records.is_empty() {
            return ReportOutcome::Empty {
                reason: EmptyReason::NoCostData,
                services: Vec::new(),
            };
        }

        let services = unique_services(&records);
        let records = filter.apply(records);

        let Some(summary) = Aggregator::summarize(&records) else {
            let service = filter
                .service()
                .cloned()
                .unwrap_or_else(|| ServiceName::new(""));
            return ReportOutcome::Empty {
                reason: EmptyReason::UnknownService(service),
                services,
            };
        };

        let monthly = Aggregator::monthly_trend(&records);
        let breakdown = Aggregator::service_breakdown(&records);
        let daily = Aggregator::daily_totals(&records);

        ReportOutcome::Ready(Box::new(CostReport {
            range,
            service_filter: filter.service().cloned(),
            services,
            records,
            summary,
            monthly,
            breakdown,
            daily,
        }))
    }
}

/// Fetch, flatten, filter and aggregate in one go
pub async fn fetch_report(
    source: &dyn CostSource,
    range: DateRange,
    filter: &RecordFilter,
) -> Result<ReportOutcome> {
    let records = fetch_records(source, range).await?;
    Ok(CostReport::build(range, records, filter))
}

/// Fetch and flatten without aggregating
pub async fn fetch_records(source: &dyn CostSource, range: DateRange) -> Result<Vec<CostRecord>> {
    info!("Fetching costs for {} from {}", range, source.describe());
    let response = source.fetch(&range).await?;

    if response.next_page_token.is_some() {
        warn!("Cost Explorer returned a NextPageToken; later pages are not fetched");
    }
    let estimated = response
        .results_by_time
        .iter()
        .filter(|r| r.estimated)
        .count();
    if estimated > 0 {
        debug!("{} of {} days carry estimated costs", estimated, response.results_by_time.len());
    }

    let records = response.to_records()?;
    info!("Built {} cost records", records.len());
    Ok(records)
}
