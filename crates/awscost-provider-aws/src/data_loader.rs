//! Live Cost Explorer source
//!
//! Issues exactly one `GetCostAndUsage` request per fetch: daily
//! granularity, unblended cost, grouped by the `SERVICE` dimension.
//! Credentials and region come from the standard AWS chain; `--region` and
//! `--profile` override it. There is no retry and no pagination.

use crate::conversion::from_sdk_output;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_costexplorer::Client;
use aws_sdk_costexplorer::error::DisplayErrorContext;
use aws_sdk_costexplorer::types::{
    DateInterval, Granularity, GroupDefinition, GroupDefinitionType,
};
use awscost_core::error::{AwsCostError, Result};
use awscost_core::provider::CostSource;
use awscost_core::response::{CostAndUsage, SERVICE_DIMENSION, UNBLENDED_COST};
use awscost_core::types::DateRange;
use tracing::{debug, info};

/// Cost Explorer is served from us-east-1 regardless of where resources run
const DEFAULT_REGION: &str = "us-east-1";

/// Overrides for the AWS configuration chain
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    pub region: Option<String>,
    pub profile: Option<String>,
}

/// `CostSource` backed by the Cost Explorer API
pub struct CostExplorerSource {
    client: Client,
    region: String,
}

impl CostExplorerSource {
    /// Create a client from the default AWS configuration chain
    pub async fn new(options: SourceOptions) -> Self {
        let region_provider = RegionProviderChain::first_try(
            options.region.map(aws_config::Region::new),
        )
        .or_default_provider()
        .or_else(DEFAULT_REGION);

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);
        if let Some(profile) = options.profile.as_deref() {
            debug!("Using AWS profile {}", profile);
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;

        let region = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self {
            client: Client::new(&config),
            region,
        }
    }

    fn date_interval(range: &DateRange) -> Result<DateInterval> {
        DateInterval::builder()
            .start(range.start_str())
            .end(range.end_str())
            .build()
            .map_err(|e| AwsCostError::Config(format!("Failed to build date interval: {e}")))
    }
}

#[async_trait]
impl CostSource for CostExplorerSource {
    async fn fetch(&self, range: &DateRange) -> Result<CostAndUsage> {
        info!(
            "Requesting daily {} grouped by {} for {}",
            UNBLENDED_COST, SERVICE_DIMENSION, range
        );

        let output = self
            .client
            .get_cost_and_usage()
            .time_period(Self::date_interval(range)?)
            .granularity(Granularity::Daily)
            .metrics(UNBLENDED_COST)
            .group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Dimension)
                    .key(SERVICE_DIMENSION)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| AwsCostError::Api(DisplayErrorContext(&e).to_string()))?;

        let response = from_sdk_output(&output)?;
        debug!(
            "Cost Explorer returned {} days and {} groups",
            response.results_by_time.len(),
            response.group_count()
        );
        Ok(response)
    }

    fn describe(&self) -> String {
        format!("AWS Cost Explorer ({})", self.region)
    }
}
