//! awscost - Report AWS costs per service from Cost Explorer

use awscost::{
    cli::{Cli, Command, DEFAULT_LOOKBACK_DAYS, ReportArgs, resolve_range},
    dashboard,
    pipeline::{build_source, load_records, load_report},
};
use awscost_core::aggregation::Aggregator;
use awscost_core::error::{LOAD_FAILURE_MESSAGE, Result};
use awscost_core::provider::CostSource;
use awscost_core::report::ReportOutcome;
use awscost_core::types::{CostRecord, DateRange};
use awscost_terminal::chart::render_daily_service_chart;
use awscost_terminal::export::export_records_csv;
use awscost_terminal::{OutputFormatter, TableFormatter, get_formatter};
use chrono::Local;
use clap::Parser;
use is_terminal::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Image written by the chart command
const CHART_FILE_NAME: &str = "aws_cost_chart.png";
const CHART_TITLE: &str = "AWS Daily Cost by Service (Last 7 Days)";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Default is quiet; --verbose wins over RUST_LOG
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new(
            "awscost=info,awscost_core=info,awscost_provider_aws=info,awscost_terminal=info",
        )
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let source = build_source(&cli).await;

    match cli.command() {
        Command::Report(args) => run_report(source.as_ref(), &args).await,
        Command::Chart => run_chart(source.as_ref()).await,
        Command::Dashboard(args) => {
            info!("Starting dashboard with {}", source.describe());
            dashboard::serve(&args.host, args.port, source).await
        }
    }
}

async fn run_report(source: &dyn CostSource, args: &ReportArgs) -> Result<()> {
    info!("Running cost report");
    let today = Local::now().date_naive();
    let range = resolve_range(args.since.as_deref(), args.until.as_deref(), today)?;
    let filter = args.filter();

    let show_progress = !args.json && std::io::stderr().is_terminal();
    let outcome = load_report(source, range, &filter, show_progress)
        .await
        .inspect_err(|_| eprintln!("{LOAD_FAILURE_MESSAGE}"))?;

    let colored = std::io::stdout().is_terminal();
    let formatter = get_formatter(args.json, colored);
    match &outcome {
        ReportOutcome::Empty { reason, .. } => println!("{}", formatter.format_empty(reason)),
        ReportOutcome::Ready(report) => println!("{}", formatter.format_report(report)),
    }

    if let Some(path) = &args.csv {
        let records: &[CostRecord] = match &outcome {
            ReportOutcome::Ready(report) => report.records.as_slice(),
            ReportOutcome::Empty { .. } => &[],
        };
        export_records_csv(path, records)?;
        if !args.json {
            println!("Saved {} records to {}", records.len(), path.display());
        }
    }
    Ok(())
}

async fn run_chart(source: &dyn CostSource) -> Result<()> {
    println!("Fetching AWS cost data...");
    let range = DateRange::last_days(Local::now().date_naive(), DEFAULT_LOOKBACK_DAYS);
    let records = load_records(source, range, std::io::stderr().is_terminal())
        .await
        .inspect_err(|_| eprintln!("{LOAD_FAILURE_MESSAGE}"))?;

    let formatter = TableFormatter::new(std::io::stdout().is_terminal());
    println!("{}", formatter.format_records(&records));

    if records.is_empty() {
        println!("No cost data found.");
        return Ok(());
    }

    let pivot = Aggregator::daily_by_service(&records);
    render_daily_service_chart(Path::new(CHART_FILE_NAME), &pivot, CHART_TITLE)?;
    println!("Chart saved as {CHART_FILE_NAME}");
    Ok(())
}
