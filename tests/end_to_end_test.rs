//! End-to-end integration tests for awscost
//!
//! These tests run the complete pipeline from a saved Cost Explorer
//! response through aggregation to the rendered outputs.

mod common;

use awscost::AwsCostError;
use awscost::pipeline::{load_records, load_report};
use awscost_core::aggregation::Aggregator;
use awscost_core::filters::RecordFilter;
use awscost_core::report::{EmptyReason, ReportOutcome};
use awscost_provider_aws::JsonFileSource;
use awscost_terminal::chart::render_daily_service_chart;
use awscost_terminal::export::export_records_csv;
use awscost_terminal::{OutputFormatter, get_formatter};
use common::{
    EC2, EMPTY_RESPONSE, FailingSource, LAMBDA, ResponseBuilder, S3, SAMPLE_RESPONSE, dec, range,
    write_fixture,
};
use tempfile::TempDir;

fn sample_source(dir: &TempDir) -> JsonFileSource {
    JsonFileSource::new(write_fixture(dir.path(), "costs.json", SAMPLE_RESPONSE))
}

#[tokio::test]
async fn test_report_from_saved_response() {
    let dir = TempDir::new().unwrap();
    let source = sample_source(&dir);

    let outcome = load_report(&source, range("2024-01-01", "2024-01-03"), &RecordFilter::new(), false)
        .await
        .unwrap();

    let ReportOutcome::Ready(report) = outcome else {
        panic!("expected a report");
    };
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.summary.total_cost, dec("27.00"));
    assert_eq!(report.summary.average_daily_cost, dec("13.50"));
    assert_eq!(report.summary.top_service.service.as_str(), EC2);
    assert_eq!(report.summary.top_service.total_cost, dec("22.00"));

    let breakdown: Vec<_> = report
        .breakdown
        .iter()
        .map(|s| (s.service.as_str(), s.total_cost))
        .collect();
    assert_eq!(breakdown, vec![(EC2, dec("22.00")), (S3, dec("5.00"))]);

    assert_eq!(report.monthly.len(), 1);
    assert_eq!(report.monthly[0].month, "2024-01");
    assert_eq!(report.monthly[0].active_days, 2);
}

#[tokio::test]
async fn test_service_filter() {
    let dir = TempDir::new().unwrap();
    let source = sample_source(&dir);
    let filter = RecordFilter::from_selection(S3);

    let outcome = load_report(&source, range("2024-01-01", "2024-01-03"), &filter, false)
        .await
        .unwrap();

    let ReportOutcome::Ready(report) = outcome else {
        panic!("expected a report");
    };
    assert_eq!(report.summary.total_cost, dec("5.00"));
    // Averaged over the one day S3 has costs
    assert_eq!(report.summary.average_daily_cost, dec("5.00"));
    // Selector still offers every service
    assert_eq!(report.services.len(), 2);
}

#[tokio::test]
async fn test_unknown_service_is_informational() {
    let dir = TempDir::new().unwrap();
    let source = sample_source(&dir);
    let filter = RecordFilter::from_selection(LAMBDA);

    let outcome = load_report(&source, range("2024-01-01", "2024-01-03"), &filter, false)
        .await
        .unwrap();

    match outcome {
        ReportOutcome::Empty { reason, services } => {
            assert!(matches!(reason, EmptyReason::UnknownService(ref s) if s.as_str() == LAMBDA));
            assert_eq!(services.len(), 2);
        }
        ReportOutcome::Ready(_) => panic!("expected an empty outcome"),
    }
}

#[tokio::test]
async fn test_empty_response_short_circuits() {
    let dir = TempDir::new().unwrap();
    let source = JsonFileSource::new(write_fixture(dir.path(), "empty.json", EMPTY_RESPONSE));

    let outcome = load_report(&source, range("2024-01-01", "2024-01-02"), &RecordFilter::new(), false)
        .await
        .unwrap();

    match &outcome {
        ReportOutcome::Empty { reason, .. } => {
            assert_eq!(*reason, EmptyReason::NoCostData);
            let text = get_formatter(false, false).format_empty(reason);
            assert_eq!(text, "No cost data available for the selected date range.");
        }
        ReportOutcome::Ready(_) => panic!("expected an empty outcome"),
    }
}

#[tokio::test]
async fn test_next_page_token_is_not_followed() {
    let dir = TempDir::new().unwrap();
    let json = ResponseBuilder::new()
        .day("2024-02-01", &[(LAMBDA, "0.0000012"), (S3, "1.5E-7")])
        .with_next_page_token("page-2")
        .to_json();
    let source = JsonFileSource::new(write_fixture(dir.path(), "paged.json", &json));

    let records = load_records(&source, range("2024-02-01", "2024-02-02"), false)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].cost, dec("0.00000015"));
}

#[tokio::test]
async fn test_malformed_amount_fails_whole_fetch() {
    let dir = TempDir::new().unwrap();
    let json = ResponseBuilder::new()
        .day("2024-02-01", &[(LAMBDA, "1.00")])
        .day("2024-02-02", &[(LAMBDA, "not-a-number")])
        .to_json();
    let source = JsonFileSource::new(write_fixture(dir.path(), "bad.json", &json));

    let result = load_records(&source, range("2024-02-01", "2024-02-03"), false).await;
    assert!(matches!(result, Err(AwsCostError::InvalidAmount { .. })));
}

#[tokio::test]
async fn test_api_failure_propagates() {
    let result = load_report(
        &FailingSource,
        range("2024-01-01", "2024-01-08"),
        &RecordFilter::new(),
        false,
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AwsCostError::Api(_)));
    assert!(err.to_string().contains("AccessDeniedException"));
}

#[tokio::test]
async fn test_json_output_and_csv_export() {
    let dir = TempDir::new().unwrap();
    let source = sample_source(&dir);

    let outcome = load_report(&source, range("2024-01-01", "2024-01-03"), &RecordFilter::new(), false)
        .await
        .unwrap();
    let ReportOutcome::Ready(report) = outcome else {
        panic!("expected a report");
    };

    let json: serde_json::Value =
        serde_json::from_str(&get_formatter(true, false).format_report(&report)).unwrap();
    assert_eq!(json["records"].as_array().unwrap().len(), 3);
    assert_eq!(json["range"]["start"], "2024-01-01");

    let csv_path = dir.path().join("out.csv");
    export_records_csv(&csv_path, &report.records).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Date,Service,Cost ($)"));
    assert_eq!(
        lines.next(),
        Some("2024-01-01,Amazon Elastic Compute Cloud - Compute,10.00")
    );
    assert_eq!(lines.count(), 2);
}

#[tokio::test]
async fn test_chart_from_saved_response() {
    let dir = TempDir::new().unwrap();
    let source = sample_source(&dir);

    let records = load_records(&source, range("2024-01-01", "2024-01-03"), false)
        .await
        .unwrap();
    let pivot = Aggregator::daily_by_service(&records);
    assert_eq!(pivot.dates.len(), 2);
    assert_eq!(pivot.series.len(), 2);

    let path = dir.path().join("aws_cost_chart.png");
    render_daily_service_chart(&path, &pivot, "AWS Daily Cost by Service").unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}
