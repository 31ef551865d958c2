//! Error types for the aggregation core.
//!
//! [`SearchError`] is what callers of [`crate::Search`] see. Caller-input
//! errors are raised before any provider is contacted. [`ProviderError`]
//! describes a single provider's failure; the aggregator records it and keeps
//! going with the remaining providers.

use serde::Serialize;

/// Errors surfaced to the caller of an aggregation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The query was empty after trimming.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// No usable source identifier was supplied.
    #[error("No valid search engine selected")]
    NoSourceSelected,

    /// A requested source is not in the registry's known set.
    #[error("unknown source '{identifier}' (known: {})", .known.join(", "))]
    UnknownSource {
        identifier: String,
        known: Vec<String>,
    },

    /// The aggregation produced no records.
    #[error("No results found{}", no_results_detail(.failed, .requested))]
    NoResults { failed: usize, requested: usize },
}

fn no_results_detail(failed: &usize, requested: &usize) -> String {
    if *failed == 0 {
        String::new()
    } else if failed == requested {
        format!(" (all {requested} providers failed)")
    } else {
        format!(" ({failed} of {requested} providers failed)")
    }
}

impl SearchError {
    /// Whether the error was caused by the caller's input rather than a provider
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuery | Self::NoSourceSelected | Self::UnknownSource { .. }
        )
    }
}

/// A single provider's fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProviderError {
    /// The query or options were rejected before a request was built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider needs credentials that were not configured.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// The call did not complete within its time budget.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Connection, TLS or body transfer failure.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// The body could not be decoded into the provider's response shape.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The provider answered successfully at the HTTP level but reported an
    /// error in the body.
    #[error("provider error: {0}")]
    Api(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
