//! CLI interface for awscost
//!
//! This module defines the command-line interface using clap. When no
//! subcommand is given, `report` runs with its defaults.
//!
//! # Example
//!
//! ```bash
//! # Costs of the last 7 days
//! awscost
//!
//! # January 2024, EC2 only, as JSON
//! awscost report --since 2024-01-01 --until 2024-02-01 \
//!     --service "Amazon Elastic Compute Cloud - Compute" --json
//!
//! # Write aws_cost_chart.png for the last 7 days
//! awscost chart
//!
//! # Serve the dashboard on http://127.0.0.1:8501
//! awscost dashboard
//! ```

use awscost_core::error::{AwsCostError, Result};
use awscost_core::filters::RecordFilter;
use awscost_core::types::DateRange;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Days covered when no start date is given
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Default dashboard port
pub const DEFAULT_PORT: u16 = 8501;

/// Report AWS costs per service from Cost Explorer
#[derive(Parser, Debug, Clone)]
#[command(name = "awscost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// AWS region for the Cost Explorer client
    #[arg(long, env = "AWS_REGION", global = true)]
    pub region: Option<String>,

    /// Named AWS profile to load credentials from
    #[arg(long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Read a saved GetCostAndUsage JSON response instead of calling AWS
    #[arg(long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print cost summary, trend, breakdown and details (default)
    Report(ReportArgs),

    /// Write a daily cost chart for the last 7 days to aws_cost_chart.png
    Chart,

    /// Serve the interactive cost dashboard
    Dashboard(DashboardArgs),
}

/// Arguments for the report command
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Start date (YYYY-MM-DD or YYYY-MM), defaults to 7 days ago
    #[arg(long)]
    pub since: Option<String>,

    /// End date (YYYY-MM-DD or YYYY-MM), defaults to today
    #[arg(long)]
    pub until: Option<String>,

    /// Only include this service
    #[arg(long, short = 's')]
    pub service: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the records to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// Arguments for the dashboard command
#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Cli {
    /// The subcommand to run, with `report` as the default
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Report(ReportArgs::default()))
    }
}

impl ReportArgs {
    /// Record filter for `--service`, where "All" selects every service
    pub fn filter(&self) -> RecordFilter {
        self.service
            .as_deref()
            .map(RecordFilter::from_selection)
            .unwrap_or_default()
    }
}

/// Parse a date argument in YYYY-MM-DD or YYYY-MM format
///
/// A bare month resolves to its first day.
pub fn parse_date_filter(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"))
        .map_err(|_| {
            AwsCostError::InvalidDate(format!("'{value}' is not a date, expected YYYY-MM-DD or YYYY-MM"))
        })
}

/// Resolve optional start/end arguments against `today`
///
/// The end defaults to `today` and the start to seven days before the end.
pub fn resolve_range(since: Option<&str>, until: Option<&str>, today: NaiveDate) -> Result<DateRange> {
    let end = until.map(parse_date_filter).transpose()?.unwrap_or(today);
    let start = match since {
        Some(s) => parse_date_filter(s)?,
        None => DateRange::last_days(end, DEFAULT_LOOKBACK_DAYS).start(),
    };
    DateRange::new(start, end)
}
