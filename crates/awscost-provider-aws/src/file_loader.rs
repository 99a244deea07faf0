//! Saved-response source
//!
//! Replays a `GetCostAndUsage` response saved as JSON, e.g. with
//! `aws ce get-cost-and-usage ... --output json > costs.json`. The query
//! range is not applied to the file; it is only logged.

use async_trait::async_trait;
use awscost_core::error::Result;
use awscost_core::provider::CostSource;
use awscost_core::response::CostAndUsage;
use awscost_core::types::DateRange;
use std::path::{Path, PathBuf};
use tracing::info;

/// `CostSource` reading a JSON file on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CostSource for JsonFileSource {
    async fn fetch(&self, range: &DateRange) -> Result<CostAndUsage> {
        info!(
            "Reading saved cost response {} (requested {})",
            self.path.display(),
            range
        );
        let text = tokio::fs::read_to_string(&self.path).await?;
        CostAndUsage::from_json(&text)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
