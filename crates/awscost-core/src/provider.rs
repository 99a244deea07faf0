//! Cost source trait
//!
//! This module defines the `CostSource` trait that data providers implement.
//! The live implementation calls Cost Explorer; others replay a saved
//! response, which keeps the rest of the pipeline independent of the SDK.

use crate::error::Result;
use crate::response::CostAndUsage;
use crate::types::DateRange;
use async_trait::async_trait;

/// Anything that can answer a daily, per-service cost query
#[async_trait]
pub trait CostSource: Send + Sync {
    /// Fetch daily unblended cost grouped by service for `range`
    async fn fetch(&self, range: &DateRange) -> Result<CostAndUsage>;

    /// Short description used in log lines
    fn describe(&self) -> String;
}
