//! Result type definitions

use crate::error::{ProviderError, SearchError};
use serde::{Deserialize, Serialize};

/// A single normalized search record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Title as reported by the provider
    pub title: String,
    /// Canonical URL, the deduplication key
    pub link: String,
    /// Short description, only when the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Identifier of the provider that returned this record
    #[serde(default)]
    pub source: String,
}

impl SearchRecord {
    /// Create a record with no snippet and no source yet
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: None,
            source: String::new(),
        }
    }

    /// Attach a snippet
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Tag the record with its provider identifier
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Provider response timing information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timing {
    /// Provider identifier
    pub engine: String,
    /// Response time in milliseconds
    pub time_ms: u64,
    /// Number of records returned before deduplication
    pub result_count: usize,
}

/// A provider that failed during an aggregation
#[derive(Debug, Clone, Serialize)]
pub struct UnresponsiveEngine {
    pub name: String,
    pub error: ProviderError,
}

/// Outcome of one aggregation call
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationResult {
    /// Merged, deduplicated records in request order
    pub records: Vec<SearchRecord>,
    /// Providers that failed, in request order
    pub unresponsive: Vec<UnresponsiveEngine>,
    /// Per-provider timings for the providers that answered
    pub timings: Vec<Timing>,
    /// Number of providers dispatched
    pub requested: usize,
}

impl AggregationResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when every dispatched provider failed
    pub fn all_failed(&self) -> bool {
        self.requested > 0 && self.unresponsive.len() == self.requested
    }

    /// Turn an empty result into [`SearchError::NoResults`]
    pub fn require_results(self) -> Result<Self, SearchError> {
        if self.records.is_empty() {
            Err(SearchError::NoResults {
                failed: self.unresponsive.len(),
                requested: self.requested,
            })
        } else {
            Ok(self)
        }
    }

    /// Consume the result, keeping only the records
    pub fn into_records(self) -> Vec<SearchRecord> {
        self.records
    }
}
