//! Aggregation module for summarizing cost records
//!
//! Every operation is a pure reduction over a slice of [`CostRecord`]s:
//! totals, average daily cost, top service, monthly rollups, per-service
//! breakdowns and the day × service pivot used for charts.
//!
//! Operations that need a non-empty set (`top_service`, `summarize`) return
//! `None` on empty input; callers short-circuit before reaching them.
//!
//! # Examples
//!
//! ```
//! use awscost_core::aggregation::Aggregator;
//! use awscost_core::types::{CostRecord, DailyDate, ServiceName};
//! use rust_decimal::Decimal;
//!
//! let records = vec![
//!     CostRecord::new(DailyDate::parse("2024-01-01").unwrap(), ServiceName::new("EC2"), Decimal::new(1000, 2)),
//!     CostRecord::new(DailyDate::parse("2024-01-01").unwrap(), ServiceName::new("S3"), Decimal::new(500, 2)),
//!     CostRecord::new(DailyDate::parse("2024-01-02").unwrap(), ServiceName::new("EC2"), Decimal::new(1200, 2)),
//! ];
//!
//! let summary = Aggregator::summarize(&records).unwrap();
//! assert_eq!(summary.total_cost, Decimal::new(2700, 2));
//! assert_eq!(summary.average_daily_cost, Decimal::new(1350, 2));
//! assert_eq!(summary.top_service.service.as_str(), "EC2");
//! ```

use crate::aggregation_types::{DailyCost, DailyServicePivot, MonthlyCost, ServiceCost, Summary};
use crate::types::{CostRecord, DailyDate, ServiceName};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Stateless collection of cost reductions
pub struct Aggregator;

impl Aggregator {
    /// Sum of all record costs
    pub fn total(records: &[CostRecord]) -> Decimal {
        records.iter().map(|r| r.cost).sum()
    }

    /// Per-day sums, ordered by date
    pub fn daily_totals(records: &[CostRecord]) -> Vec<DailyCost> {
        let mut daily_map: BTreeMap<DailyDate, (Decimal, usize)> = BTreeMap::new();

        for record in records {
            let entry = daily_map.entry(record.date).or_insert((Decimal::ZERO, 0));
            entry.0 += record.cost;
            entry.1 += 1;
        }

        daily_map
            .into_iter()
            .map(|(date, (total_cost, services))| DailyCost {
                date,
                total_cost,
                services,
            })
            .collect()
    }

    /// Mean of the per-day sums over the days present; zero when empty
    pub fn average_daily(records: &[CostRecord]) -> Decimal {
        let daily = Self::daily_totals(records);
        if daily.is_empty() {
            return Decimal::ZERO;
        }

        let sum: Decimal = daily.iter().map(|d| d.total_cost).sum();
        sum / Decimal::from(daily.len())
    }

    /// Per-service sums keyed by service name
    fn service_totals(records: &[CostRecord]) -> BTreeMap<&ServiceName, Decimal> {
        let mut totals: BTreeMap<&ServiceName, Decimal> = BTreeMap::new();
        for record in records {
            *totals.entry(&record.service).or_insert(Decimal::ZERO) += record.cost;
        }
        totals
    }

    /// Service with the highest summed cost
    ///
    /// Among services with equal totals the lexicographically smallest name
    /// wins. Returns `None` for an empty set.
    pub fn top_service(records: &[CostRecord]) -> Option<ServiceCost> {
        let mut best: Option<(&ServiceName, Decimal)> = None;

        // BTreeMap iterates in name order, so only a strictly larger total
        // may replace the current best
        for (service, total) in Self::service_totals(records) {
            match best {
                Some((_, best_total)) if total <= best_total => {}
                _ => best = Some((service, total)),
            }
        }

        best.map(|(service, total_cost)| ServiceCost {
            service: service.clone(),
            total_cost,
        })
    }

    /// Per-month sums ordered by month
    pub fn monthly_trend(records: &[CostRecord]) -> Vec<MonthlyCost> {
        let mut monthly_map: BTreeMap<String, (Decimal, BTreeSet<DailyDate>)> = BTreeMap::new();

        for record in records {
            let entry = monthly_map
                .entry(record.date.month_key())
                .or_insert_with(|| (Decimal::ZERO, BTreeSet::new()));
            entry.0 += record.cost;
            entry.1.insert(record.date);
        }

        monthly_map
            .into_iter()
            .map(|(month, (total_cost, days))| MonthlyCost {
                month,
                total_cost,
                active_days: days.len(),
            })
            .collect()
    }

    /// Per-service sums sorted by cost descending, then by name
    pub fn service_breakdown(records: &[CostRecord]) -> Vec<ServiceCost> {
        let mut breakdown: Vec<ServiceCost> = Self::service_totals(records)
            .into_iter()
            .map(|(service, total_cost)| ServiceCost {
                service: service.clone(),
                total_cost,
            })
            .collect();

        breakdown.sort_by(|a, b| {
            b.total_cost
                .cmp(&a.total_cost)
                .then_with(|| a.service.cmp(&b.service))
        });
        breakdown
    }

    /// Day × service matrix with services in name order
    pub fn daily_by_service(records: &[CostRecord]) -> DailyServicePivot {
        let dates: Vec<DailyDate> = records
            .iter()
            .map(|r| r.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut cells: BTreeMap<&ServiceName, BTreeMap<DailyDate, Decimal>> = BTreeMap::new();
        for record in records {
            *cells
                .entry(&record.service)
                .or_default()
                .entry(record.date)
                .or_insert(Decimal::ZERO) += record.cost;
        }

        let series = cells
            .into_iter()
            .map(|(service, by_date)| {
                let values = dates
                    .iter()
                    .map(|date| by_date.get(date).copied().unwrap_or(Decimal::ZERO))
                    .collect();
                (service.clone(), values)
            })
            .collect();

        DailyServicePivot { dates, series }
    }

    /// Headline figures for the summary cards; `None` for an empty set
    pub fn summarize(records: &[CostRecord]) -> Option<Summary> {
        let top_service = Self::top_service(records)?;
        let daily = Self::daily_totals(records);
        let services = Self::service_totals(records).len();

        let total_cost = Self::total(records);
        let average_daily_cost = total_cost / Decimal::from(daily.len());

        debug!(
            "Summarized {} records over {} days and {} services",
            records.len(),
            daily.len(),
            services
        );

        Some(Summary {
            total_cost,
            average_daily_cost,
            top_service,
            days: daily.len(),
            services,
            records: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dec, record, sample_records};

    #[test]
    fn test_reference_example() {
        let records = sample_records();

        assert_eq!(Aggregator::total(&records), dec("27.00"));
        assert_eq!(Aggregator::average_daily(&records), dec("13.50"));

        let top = Aggregator::top_service(&records).unwrap();
        assert_eq!(top.service.as_str(), "EC2");
        assert_eq!(top.total_cost, dec("22.00"));

        let breakdown = Aggregator::service_breakdown(&records);
        assert_eq!(
            breakdown,
            vec![
                ServiceCost {
                    service: ServiceName::new("EC2"),
                    total_cost: dec("22.00"),
                },
                ServiceCost {
                    service: ServiceName::new("S3"),
                    total_cost: dec("5.00"),
                },
            ]
        );
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(Aggregator::total(&[]), Decimal::ZERO);
        assert_eq!(Aggregator::average_daily(&[]), Decimal::ZERO);
        assert!(Aggregator::top_service(&[]).is_none());
        assert!(Aggregator::summarize(&[]).is_none());
        assert!(Aggregator::monthly_trend(&[]).is_empty());
        assert!(Aggregator::service_breakdown(&[]).is_empty());
        assert!(Aggregator::daily_by_service(&[]).is_empty());
    }

    #[test]
    fn test_top_service_tie_breaks_by_name() {
        let records = vec![
            record("2024-01-01", "Amazon S3", "5.00"),
            record("2024-01-01", "AWS Lambda", "5.00"),
            record("2024-01-02", "Amazon EC2", "2.00"),
            record("2024-01-02", "Amazon EC2", "3.00"),
        ];

        // "AWS Lambda" < "Amazon EC2" < "Amazon S3" in byte order
        let top = Aggregator::top_service(&records).unwrap();
        assert_eq!(top.service.as_str(), "AWS Lambda");
        assert_eq!(top.total_cost, dec("5.00"));

        let names: Vec<_> = Aggregator::service_breakdown(&records)
            .into_iter()
            .map(|s| s.service.to_string())
            .collect();
        assert_eq!(names, vec!["AWS Lambda", "Amazon EC2", "Amazon S3"]);
    }

    #[test]
    fn test_monthly_trend_spans_months() {
        let records = vec![
            record("2024-01-30", "EC2", "1.00"),
            record("2024-01-31", "EC2", "2.00"),
            record("2024-01-31", "S3", "0.50"),
            record("2024-02-01", "EC2", "4.00"),
            record("2023-12-31", "EC2", "8.00"),
        ];

        let monthly = Aggregator::monthly_trend(&records);
        assert_eq!(monthly.len(), 3);
        assert_eq!(monthly[0].month, "2023-12");
        assert_eq!(monthly[1].month, "2024-01");
        assert_eq!(monthly[1].total_cost, dec("3.50"));
        assert_eq!(monthly[1].active_days, 2);
        assert_eq!(monthly[2].month, "2024-02");
        assert_eq!(monthly[2].total_cost, dec("4.00"));
    }

    #[test]
    fn test_average_counts_only_present_days() {
        let records = vec![
            record("2024-01-01", "EC2", "6.00"),
            record("2024-01-05", "EC2", "2.00"),
        ];
        assert_eq!(Aggregator::average_daily(&records), dec("4.00"));

        let summary = Aggregator::summarize(&records).unwrap();
        assert_eq!(summary.days, 2);
        assert_eq!(summary.services, 1);
        assert_eq!(summary.records, 2);
    }

    #[test]
    fn test_daily_totals() {
        let daily = Aggregator::daily_totals(&sample_records());
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date.to_string(), "2024-01-01");
        assert_eq!(daily[0].total_cost, dec("15.00"));
        assert_eq!(daily[0].services, 2);
        assert_eq!(daily[1].total_cost, dec("12.00"));
    }

    #[test]
    fn test_daily_by_service_fills_gaps() {
        let pivot = Aggregator::daily_by_service(&sample_records());
        assert_eq!(pivot.dates.len(), 2);
        assert_eq!(pivot.series.len(), 2);

        let (ec2, ec2_values) = &pivot.series[0];
        assert_eq!(ec2.as_str(), "EC2");
        assert_eq!(ec2_values, &vec![dec("10.00"), dec("12.00")]);

        let (s3, s3_values) = &pivot.series[1];
        assert_eq!(s3.as_str(), "S3");
        assert_eq!(s3_values, &vec![dec("5.00"), Decimal::ZERO]);

        assert_eq!(pivot.max_value(), dec("12.00"));
    }

    #[test]
    fn test_negative_credits_reduce_totals() {
        let records = vec![
            record("2024-01-01", "EC2", "10.00"),
            record("2024-01-01", "Credits", "-4.00"),
        ];
        assert_eq!(Aggregator::total(&records), dec("6.00"));
        assert_eq!(
            Aggregator::top_service(&records).unwrap().service.as_str(),
            "EC2"
        );
    }
}
