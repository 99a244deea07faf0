//! Source selection and the spinner-wrapped fetch used by the CLI commands

use crate::cli::Cli;
use awscost_core::error::Result;
use awscost_core::filters::RecordFilter;
use awscost_core::provider::CostSource;
use awscost_core::report::{ReportOutcome, fetch_records, fetch_report};
use awscost_core::types::{CostRecord, DateRange};
use awscost_provider_aws::{CostExplorerSource, JsonFileSource, SourceOptions};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Pick the cost source from the global flags
///
/// `--input` replays a saved response; otherwise Cost Explorer is called.
pub async fn build_source(cli: &Cli) -> Arc<dyn CostSource> {
    match &cli.input {
        Some(path) => {
            info!("Using saved response {}", path.display());
            Arc::new(JsonFileSource::new(path.clone()))
        }
        None => {
            let options = SourceOptions {
                region: cli.region.clone(),
                profile: cli.profile.clone(),
            };
            Arc::new(CostExplorerSource::new(options).await)
        }
    }
}

/// Await `task` while a spinner runs on stderr
async fn with_spinner<T>(show_progress: bool, message: &str, task: impl Future<Output = T>) -> T {
    let progress = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.magenta} {msg} [{elapsed_precise}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = task.await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    result
}

/// Run the full report pipeline
pub async fn load_report(
    source: &dyn CostSource,
    range: DateRange,
    filter: &RecordFilter,
    show_progress: bool,
) -> Result<ReportOutcome> {
    with_spinner(
        show_progress,
        "Querying AWS Cost Explorer",
        fetch_report(source, range, filter),
    )
    .await
}

/// Fetch and flatten records only
pub async fn load_records(
    source: &dyn CostSource,
    range: DateRange,
    show_progress: bool,
) -> Result<Vec<CostRecord>> {
    with_spinner(
        show_progress,
        "Querying AWS Cost Explorer",
        fetch_records(source, range),
    )
    .await
}
