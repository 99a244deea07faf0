//! SDK output to response model conversion
//!
//! Copies the fields the table builder reads out of the SDK's
//! `GetCostAndUsageOutput` into [`CostAndUsage`], so the same flattening
//! code serves live and saved responses.

use aws_sdk_costexplorer::operation::get_cost_and_usage::GetCostAndUsageOutput;
use aws_sdk_costexplorer::types::{Group, ResultByTime as SdkResultByTime};
use awscost_core::error::{AwsCostError, Result};
use awscost_core::response::{CostAndUsage, CostGroup, MetricValue, ResultByTime, TimePeriod};

/// Convert a full SDK response
pub fn from_sdk_output(output: &GetCostAndUsageOutput) -> Result<CostAndUsage> {
    let results_by_time = output
        .results_by_time()
        .iter()
        .map(convert_result)
        .collect::<Result<Vec<_>>>()?;

    Ok(CostAndUsage {
        results_by_time,
        next_page_token: output.next_page_token().map(str::to_string),
    })
}

fn convert_result(result: &SdkResultByTime) -> Result<ResultByTime> {
    let period = result
        .time_period()
        .ok_or_else(|| AwsCostError::MissingField("TimePeriod of a result".to_string()))?;

    Ok(ResultByTime {
        time_period: TimePeriod {
            start: period.start().to_string(),
            end: period.end().to_string(),
        },
        groups: result.groups().iter().map(convert_group).collect(),
        estimated: result.estimated(),
    })
}

fn convert_group(group: &Group) -> CostGroup {
    let metrics = group
        .metrics()
        .map(|metrics| {
            metrics
                .iter()
                .map(|(name, value)| {
                    (
                        name.clone(),
                        MetricValue {
                            amount: value.amount().unwrap_or_default().to_string(),
                            unit: value.unit().unwrap_or_default().to_string(),
                        },
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    CostGroup {
        keys: group.keys().to_vec(),
        metrics,
    }
}
