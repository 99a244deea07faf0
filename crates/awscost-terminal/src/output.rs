//! Output formatting module for awscost
//!
//! This module provides formatters for displaying cost reports in different
//! formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! Costs are kept as exact decimals; JSON output carries them as strings so
//! no precision is lost.

use awscost_core::aggregation_types::{MonthlyCost, ServiceCost, Summary};
use awscost_core::report::{CostReport, EmptyReason};
use awscost_core::types::CostRecord;
use colored::Colorize;
use prettytable::{Cell, Row, Table, format, row};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::json;

/// Width of the text bars in the service breakdown table
const BAR_WIDTH: usize = 24;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the whole report: cards, monthly trend, breakdown, details
    fn format_report(&self, report: &CostReport) -> String;

    /// Format only the detail records
    fn format_records(&self, records: &[CostRecord]) -> String;

    /// Format the informational message for an empty run
    fn format_empty(&self, reason: &EmptyReason) -> String;
}

/// Format a decimal amount as dollars with thousands separators
///
/// # Examples
/// ```
/// use awscost_terminal::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456789, 2)), "$1,234,567.89");
/// assert_eq!(format_currency(Decimal::new(-5, 1)), "-$0.50");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (count, ch) in whole.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let whole: String = grouped.chars().rev().collect();

    format!("{sign}${whole}.{fraction}")
}

/// Percentage of `part` in `total`, one decimal place
fn format_share(part: Decimal, total: Decimal) -> String {
    if total.is_zero() {
        return "-".to_string();
    }
    let share = (part / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{share:.1}%")
}

/// Text bar proportional to `value / max`
fn text_bar(value: Decimal, max: Decimal) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let cells = (value / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .clamp(1, BAR_WIDTH);
    "█".repeat(cells)
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Use colors and bold section headings
    pub colored: bool,
}

impl TableFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn heading(&self, text: &str) -> String {
        if self.colored {
            format!("{}\n", text.bold().magenta())
        } else {
            format!("{text}\n")
        }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }

    /// The three summary cards
    fn format_cards(summary: &Summary) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Total Cost",
            b -> "Average Daily Cost",
            b -> "Top Service"
        ]);
        table.add_row(row![
            r -> format_currency(summary.total_cost),
            r -> format_currency(summary.average_daily_cost),
            summary.top_service.service.as_str()
        ]);
        table.add_row(row![
            "",
            "",
            r -> format_currency(summary.top_service.total_cost)
        ]);
        table.to_string()
    }

    fn format_monthly(monthly: &[MonthlyCost], total: Decimal) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Month", b -> "Cost", b -> "Active Days"]);

        for month in monthly {
            table.add_row(row![
                month.month,
                r -> format_currency(month.total_cost),
                c -> month.active_days
            ]);
        }

        table.add_row(Row::new(vec![Cell::new(""); 3]));
        table.add_row(row![b -> "TOTAL", b -> format_currency(total), ""]);
        table.to_string()
    }

    fn format_breakdown(breakdown: &[ServiceCost], total: Decimal) -> String {
        let max = breakdown
            .iter()
            .map(|s| s.total_cost)
            .max()
            .unwrap_or(Decimal::ZERO);

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Service", b -> "Cost", b -> "Share", b -> ""]);

        for service in breakdown {
            table.add_row(row![
                service.service.as_str(),
                r -> format_currency(service.total_cost),
                r -> format_share(service.total_cost, total),
                text_bar(service.total_cost, max)
            ]);
        }

        table.to_string()
    }

    fn format_detail(records: &[CostRecord]) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Date", b -> "Service", b -> "Cost ($)"]);

        for record in records {
            table.add_row(row![
                record.date.to_string(),
                record.service.as_str(),
                r -> record.cost.to_string()
            ]);
        }

        table.to_string()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_report(&self, report: &CostReport) -> String {
        let mut output = String::new();
        let service = report
            .service_filter
            .as_ref()
            .map(|s| s.as_str())
            .unwrap_or("All");

        output.push_str(&self.heading(&format!(
            "Cost Summary ({}, service: {})",
            report.range, service
        )));
        output.push_str(&Self::format_cards(&report.summary));

        output.push('\n');
        output.push_str(&self.heading("Month-to-Month Trend"));
        output.push_str(&Self::format_monthly(
            &report.monthly,
            report.summary.total_cost,
        ));

        output.push('\n');
        output.push_str(&self.heading("Service Cost Breakdown"));
        output.push_str(&Self::format_breakdown(
            &report.breakdown,
            report.summary.total_cost,
        ));

        output.push('\n');
        output.push_str(&self.heading("Daily Details"));
        output.push_str(&Self::format_detail(&report.records));
        output
    }

    fn format_records(&self, records: &[CostRecord]) -> String {
        Self::format_detail(records)
    }

    fn format_empty(&self, reason: &EmptyReason) -> String {
        if self.colored {
            reason.to_string().yellow().to_string()
        } else {
            reason.to_string()
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn records_json(records: &[CostRecord]) -> serde_json::Value {
        json!(
            records
                .iter()
                .map(|r| json!({
                    "date": r.date.to_string(),
                    "service": r.service.as_str(),
                    "cost": r.cost,
                }))
                .collect::<Vec<_>>()
        )
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &CostReport) -> String {
        let summary = &report.summary;
        let output = json!({
            "range": {
                "start": report.range.start_str(),
                "end": report.range.end_str(),
            },
            "service": report.service_filter.as_ref().map(|s| s.as_str()),
            "summary": {
                "total_cost": summary.total_cost,
                "average_daily_cost": summary.average_daily_cost,
                "top_service": {
                    "service": summary.top_service.service.as_str(),
                    "total_cost": summary.top_service.total_cost,
                },
                "days": summary.days,
                "services": summary.services,
                "records": summary.records,
            },
            "monthly": report.monthly.iter().map(|m| json!({
                "month": m.month,
                "total_cost": m.total_cost,
                "active_days": m.active_days,
            })).collect::<Vec<_>>(),
            "services": report.breakdown.iter().map(|s| json!({
                "service": s.service.as_str(),
                "total_cost": s.total_cost,
            })).collect::<Vec<_>>(),
            "available_services": report.services.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            "records": Self::records_json(&report.records),
        });

        serde_json::to_string_pretty(&output).unwrap_or_default()
    }

    fn format_records(&self, records: &[CostRecord]) -> String {
        serde_json::to_string_pretty(&json!({ "records": Self::records_json(records) }))
            .unwrap_or_default()
    }

    fn format_empty(&self, reason: &EmptyReason) -> String {
        serde_json::to_string_pretty(&json!({
            "message": reason.to_string(),
            "records": [],
        }))
        .unwrap_or_default()
    }
}

/// Get the appropriate formatter based on output preference
pub fn get_formatter(json_output: bool, colored: bool) -> Box<dyn OutputFormatter> {
    if json_output {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(colored))
    }
}
