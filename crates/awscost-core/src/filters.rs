//! Filtering module for cost records
//!
//! The only filter the reports offer is a single service selection.
//!
//! # Examples
//!
//! ```
//! use awscost_core::filters::RecordFilter;
//!
//! // "All" from a selector means no restriction
//! let filter = RecordFilter::from_selection("All");
//! assert!(filter.service().is_none());
//!
//! let filter = RecordFilter::new().with_service("AWS Lambda".to_string());
//! assert_eq!(filter.service().unwrap().as_str(), "AWS Lambda");
//! ```

use crate::types::{CostRecord, ServiceName};

/// Selector value meaning "every service"
pub const ALL_SERVICES: &str = "All";

/// Filter configuration for cost records
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    service: Option<ServiceName>,
}

impl RecordFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single service
    pub fn with_service(mut self, service: String) -> Self {
        self.service = Some(ServiceName::new(service));
        self
    }

    /// Build from a selector value, where `All` or an empty value means no filter
    pub fn from_selection(selection: &str) -> Self {
        let selection = selection.trim();
        if selection.is_empty() || selection.eq_ignore_ascii_case(ALL_SERVICES) {
            Self::new()
        } else {
            Self::new().with_service(selection.to_string())
        }
    }

    /// Selected service, if any
    pub fn service(&self) -> Option<&ServiceName> {
        self.service.as_ref()
    }

    /// Check if a record passes the filter
    pub fn matches(&self, record: &CostRecord) -> bool {
        match &self.service {
            Some(service) => &record.service == service,
            None => true,
        }
    }

    /// Keep only matching records, preserving order
    pub fn apply(&self, records: Vec<CostRecord>) -> Vec<CostRecord> {
        if self.service.is_none() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
