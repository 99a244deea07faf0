//! Web dashboard
//!
//! A single stateless page served by axum. Every request runs the full
//! pipeline against the shared [`CostSource`]; nothing is cached.
//!
//! Routes:
//! - `GET /` HTML dashboard, query `start`, `end`, `service`
//! - `GET /download` filtered records as `aws_cost_data.csv`
//! - `GET /api/report` the report as JSON
//! - `GET /health` liveness check

use crate::cli::resolve_range;
use awscost_core::error::{AwsCostError, LOAD_FAILURE_MESSAGE, Result};
use awscost_core::filters::{ALL_SERVICES, RecordFilter};
use awscost_core::provider::CostSource;
use awscost_core::report::{CostReport, ReportOutcome, fetch_report};
use awscost_core::types::{DateRange, ServiceName};
use awscost_terminal::chart::{monthly_trend_svg, service_breakdown_svg};
use awscost_terminal::export::{CSV_FILE_NAME, CSV_MIME_TYPE, records_to_csv_string};
use awscost_terminal::{JsonFormatter, OutputFormatter, format_currency};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{info, warn};

const PAGE_TITLE: &str = "AWS FinOps Cost Dashboard";
const PAGE_SUBTITLE: &str =
    "A visual dashboard for tracking, analyzing, and exporting AWS cost insights over time.";

const INVALID_QUERY_MESSAGE: &str = "Invalid date selection.";

const STYLE: &str = r#"
body { margin: 0; display: flex; min-height: 100vh; background-color: #fff3f6; color: #333333; font-family: 'Segoe UI', sans-serif; }
aside { width: 260px; padding: 24px; background-color: #ffe6eb; }
aside label { display: block; margin-bottom: 14px; }
aside input, aside select, aside button { display: block; width: 100%; margin-top: 4px; padding: 6px; box-sizing: border-box; }
main { flex: 1; padding: 24px 40px; }
h1, h2, h3, h4 { color: #b23a5a; }
.cards { display: flex; gap: 20px; }
.metric-container { flex: 1; background-color: white; border-radius: 10px; box-shadow: 0 2px 8px rgba(0,0,0,0.05); padding: 20px; text-align: center; }
.info { background-color: #e8f1fb; border-radius: 8px; padding: 14px; }
.error { background-color: #fde8e8; border-radius: 8px; padding: 14px; }
.error pre { white-space: pre-wrap; }
table { border-collapse: collapse; width: 100%; background-color: white; }
th, td { padding: 6px 10px; border-bottom: 1px solid #f3d0da; text-align: left; }
td.cost { text-align: right; }
.download button { margin-top: 16px; padding: 8px 16px; background-color: #FFB6C1; border: none; border-radius: 6px; }
"#;

/// Shared state of the dashboard handlers
#[derive(Clone)]
pub struct DashboardState {
    source: Arc<dyn CostSource>,
}

impl DashboardState {
    pub fn new(source: Arc<dyn CostSource>) -> Self {
        Self { source }
    }
}

/// Query string of every data route
///
/// Empty values count as absent, which is what an untouched form submits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub service: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl DashboardQuery {
    fn range(&self, today: NaiveDate) -> Result<DateRange> {
        resolve_range(non_empty(&self.start), non_empty(&self.end), today)
    }

    fn filter(&self) -> RecordFilter {
        RecordFilter::from_selection(non_empty(&self.service).unwrap_or(ALL_SERVICES))
    }
}

/// Error returned by the data routes
///
/// Only the stage matters: a query that cannot be turned into a date range
/// is rejected, anything failing after that is reported as a load failure
/// with the raw error text.
#[derive(Debug)]
pub enum DashboardError {
    InvalidQuery(AwsCostError),
    LoadFailed(AwsCostError),
}

impl DashboardError {
    fn status(&self) -> StatusCode {
        match self {
            DashboardError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            DashboardError::LoadFailed(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            DashboardError::InvalidQuery(_) => INVALID_QUERY_MESSAGE,
            DashboardError::LoadFailed(_) => LOAD_FAILURE_MESSAGE,
        }
    }

    fn source_error(&self) -> &AwsCostError {
        match self {
            DashboardError::InvalidQuery(err) | DashboardError::LoadFailed(err) => err,
        }
    }
}

impl From<AwsCostError> for DashboardError {
    fn from(err: AwsCostError) -> Self {
        DashboardError::LoadFailed(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let body = format!("{}\n\n{}", self.message(), self.source_error());
        (self.status(), body).into_response()
    }
}

/// Build the dashboard router
pub fn router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/download", get(download))
        .route("/api/report", get(api_report))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(host: &str, port: u16, source: Arc<dyn CostSource>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Serving dashboard on http://{}:{}", host, port);
    println!("Dashboard running at http://{host}:{port}");

    axum::serve(listener, router(DashboardState::new(source)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}

async fn load(
    state: &DashboardState,
    query: &DashboardQuery,
) -> std::result::Result<(DateRange, ReportOutcome), DashboardError> {
    let range = query
        .range(Local::now().date_naive())
        .map_err(DashboardError::InvalidQuery)?;
    let outcome = fetch_report(state.source.as_ref(), range, &query.filter()).await?;
    Ok((range, outcome))
}

async fn health() -> &'static str {
    "ok"
}

async fn index(State(state): State<DashboardState>, Query(query): Query<DashboardQuery>) -> Response {
    let selected = non_empty(&query.service).unwrap_or(ALL_SERVICES).to_string();
    let today = Local::now().date_naive();

    match load(&state, &query).await {
        Ok((range, outcome)) => {
            let body = match &outcome {
                ReportOutcome::Empty { reason, .. } => {
                    format!(r#"<div class="info">{}</div>"#, escape_html(&reason.to_string()))
                }
                ReportOutcome::Ready(report) => render_report(report, &selected),
            };
            let form = render_form(
                &range.start_str(),
                &range.end_str(),
                outcome.services(),
                &selected,
            );
            Html(render_page(&form, &body)).into_response()
        }
        Err(err) => {
            warn!("Dashboard request failed: {}", err.source_error());
            let status = err.status();
            let fallback = DateRange::last_days(today, crate::cli::DEFAULT_LOOKBACK_DAYS);
            let start = non_empty(&query.start).map(str::to_string).unwrap_or_else(|| fallback.start_str());
            let end = non_empty(&query.end).map(str::to_string).unwrap_or_else(|| fallback.end_str());
            let form = render_form(&start, &end, &[], &selected);
            let body = format!(
                r#"<div class="error"><p>{}</p><pre>{}</pre></div>"#,
                escape_html(err.message()),
                escape_html(&err.source_error().to_string())
            );
            (status, Html(render_page(&form, &body))).into_response()
        }
    }
}

async fn download(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> std::result::Result<Response, DashboardError> {
    let (_, outcome) = load(&state, &query).await?;
    let csv = match &outcome {
        ReportOutcome::Ready(report) => records_to_csv_string(&report.records)?,
        ReportOutcome::Empty { .. } => records_to_csv_string(&[])?,
    };

    Ok((
        [
            (header::CONTENT_TYPE, CSV_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILE_NAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

async fn api_report(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> std::result::Result<Response, DashboardError> {
    let (_, outcome) = load(&state, &query).await?;
    let body = match &outcome {
        ReportOutcome::Ready(report) => JsonFormatter.format_report(report),
        ReportOutcome::Empty { reason, .. } => JsonFormatter.format_empty(reason),
    };
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_page(form: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AWS FinOps Dashboard</title>
<style>{STYLE}</style>
</head>
<body>
<aside>
<h2>Filters</h2>
{form}
</aside>
<main>
<h1>{PAGE_TITLE}</h1>
<p>{PAGE_SUBTITLE}</p>
{body}
</main>
</body>
</html>
"#
    )
}

fn render_form(start: &str, end: &str, services: &[ServiceName], selected: &str) -> String {
    let mut options = String::new();
    let all_selected = selected.eq_ignore_ascii_case(ALL_SERVICES);
    let _ = write!(
        options,
        r#"<option value="{ALL_SERVICES}"{}>{ALL_SERVICES}</option>"#,
        if all_selected { " selected" } else { "" }
    );
    for service in services {
        let name = escape_html(service.as_str());
        let mark = if service.as_str() == selected { " selected" } else { "" };
        let _ = write!(options, r#"<option value="{name}"{mark}>{name}</option>"#);
    }

    format!(
        r#"<form method="get" action="/">
<label>Start Date<input type="date" name="start" value="{}"></label>
<label>End Date<input type="date" name="end" value="{}"></label>
<label>AWS Service<select name="service">{options}</select></label>
<button type="submit">Apply</button>
</form>"#,
        escape_html(start),
        escape_html(end)
    )
}

fn chart_or_error(chart: Result<String>) -> String {
    chart.unwrap_or_else(|e| format!(r#"<div class="error">{}</div>"#, escape_html(&e.to_string())))
}

fn render_report(report: &CostReport, selected: &str) -> String {
    let summary = &report.summary;
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<h2>Cost Summary</h2>
<div class="cards">
<div class="metric-container"><h3>Total Cost</h3><h2>{}</h2></div>
<div class="metric-container"><h3>Average Daily Cost</h3><h2>{}</h2></div>
<div class="metric-container"><h3>Top Service</h3><h2>{}</h2><p>{}</p></div>
</div>"#,
        format_currency(summary.total_cost),
        format_currency(summary.average_daily_cost),
        escape_html(summary.top_service.service.as_str()),
        format_currency(summary.top_service.total_cost),
    );

    let _ = write!(
        html,
        "<h2>Month-to-Month Trend</h2>\n{}\n<h2>Service Cost Breakdown</h2>\n{}\n",
        chart_or_error(monthly_trend_svg(&report.monthly)),
        chart_or_error(service_breakdown_svg(&report.breakdown)),
    );

    html.push_str("<h2>Daily Details</h2>\n<table>\n<tr><th>Date</th><th>Service</th><th>Cost ($)</th></tr>\n");
    for record in &report.records {
        let _ = writeln!(
            html,
            r#"<tr><td>{}</td><td>{}</td><td class="cost">{}</td></tr>"#,
            record.date,
            escape_html(record.service.as_str()),
            record.cost
        );
    }
    html.push_str("</table>\n");

    let _ = write!(
        html,
        r#"<form class="download" method="get" action="/download">
<input type="hidden" name="start" value="{}">
<input type="hidden" name="end" value="{}">
<input type="hidden" name="service" value="{}">
<button type="submit">Download CSV</button>
</form>"#,
        report.range.start_str(),
        report.range.end_str(),
        escape_html(selected)
    );

    html
}
