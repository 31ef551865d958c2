//! Search Aggregator: one query, several providers, one merged result list
//!
//! A query is fanned out to every requested provider (Google Custom Search,
//! Wikipedia), each provider's response is normalized into a [`SearchRecord`]
//! tagged with its source, and the per-provider lists are concatenated in
//! request order and deduplicated by link.

pub mod config;
pub mod engines;
pub mod error;
pub mod network;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use engines::{Engine, EngineRegistry};
pub use error::{ProviderError, SearchError};
pub use results::{dedupe, AggregationResult, SearchRecord};
pub use search::{Search, SearchQuery};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for provider requests in seconds
pub const DEFAULT_TIMEOUT: f64 = 5.0;

/// Maximum timeout that can be set
pub const MAX_TIMEOUT: f64 = 30.0;

/// Default number of records requested from each provider
pub const DEFAULT_MAX_RESULTS: u32 = 5;
