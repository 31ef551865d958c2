//! Search query model

use crate::engines::normalize_identifier;
use crate::DEFAULT_MAX_RESULTS;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete search query with all parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search query string
    pub query: String,
    /// Requested source identifiers, as supplied by the caller
    pub sources: Vec<String>,
    /// Records requested from each provider
    pub max_results: u32,
    /// Custom per-provider timeout in seconds
    pub timeout_limit: Option<f64>,
}

impl SearchQuery {
    /// Create a query against the given sources
    pub fn new<I, S>(query: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query: query.into(),
            sources: sources.into_iter().map(Into::into).collect(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_limit: None,
        }
    }

    /// Set the per-provider result cap (at least 1)
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_limit = Some(seconds);
        self
    }

    /// Check if query is empty
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Trimmed, lowercased source identifiers with blanks and repeats removed.
    ///
    /// A single entry may hold a comma-separated list (`"google, wikipedia"`).
    /// First occurrence order is kept.
    pub fn normalized_sources(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.sources
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(normalize_identifier)
            .filter(|id| !id.is_empty())
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }
}
