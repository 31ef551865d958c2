//! Search execution and orchestration

use super::models::SearchQuery;
use crate::config::Settings;
use crate::engines::{Engine, EngineRegistry};
use crate::error::{ProviderError, SearchError};
use crate::network::HttpClient;
use crate::results::{AggregationResult, ResultContainer, SearchRecord};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Search executor that fans a query out to the requested providers
pub struct Search {
    /// HTTP client for making requests
    client: HttpClient,
    /// Engine registry
    registry: Arc<EngineRegistry>,
    /// Default timeout
    default_timeout: Duration,
    /// Maximum timeout
    max_timeout: Duration,
    /// Default per-provider result cap
    max_results: u32,
}

impl Search {
    /// Create a new search executor
    pub fn new(client: HttpClient, registry: Arc<EngineRegistry>) -> Self {
        Self {
            client,
            registry,
            default_timeout: Duration::from_secs_f64(crate::DEFAULT_TIMEOUT),
            max_timeout: Duration::from_secs_f64(crate::MAX_TIMEOUT),
            max_results: crate::DEFAULT_MAX_RESULTS,
        }
    }

    /// Create a search executor with the timeouts and result cap from settings
    pub fn from_settings(
        client: HttpClient,
        registry: Arc<EngineRegistry>,
        settings: &Settings,
    ) -> Self {
        Self::new(client, registry)
            .with_timeout(Duration::from_secs_f64(
                settings.outgoing.request_timeout.max(0.001),
            ))
            .with_max_timeout(Duration::from_secs_f64(
                settings.outgoing.max_request_timeout.max(0.001),
            ))
            .with_max_results(settings.search.max_results)
    }

    /// Set default timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set maximum timeout
    pub fn with_max_timeout(mut self, timeout: Duration) -> Self {
        self.max_timeout = timeout;
        self
    }

    /// Set the per-provider result cap used by [`Search::run`]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// The registry this executor resolves sources against
    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// Run `query` against `sources` with the executor's defaults
    pub async fn run<S: AsRef<str>>(
        &self,
        query: &str,
        sources: &[S],
    ) -> Result<AggregationResult, SearchError> {
        let query = SearchQuery::new(query, sources.iter().map(|s| s.as_ref().to_string()))
            .with_max_results(self.max_results);
        self.execute(&query).await
    }

    /// Execute a search query across all requested providers.
    ///
    /// Caller-input problems (blank query, no sources, unknown source) are
    /// reported before any provider is contacted. After that, each provider
    /// failure is recorded in the result and never aborts its siblings.
    pub async fn execute(&self, query: &SearchQuery) -> Result<AggregationResult, SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let sources = query.normalized_sources();
        if sources.is_empty() {
            return Err(SearchError::NoSourceSelected);
        }

        let engines = sources
            .iter()
            .map(|source| self.registry.resolve(source))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Executing search '{}' on {} engines",
            query.query.trim(),
            engines.len()
        );

        // join_all yields outcomes in input order, whatever the completion order
        let outcomes = join_all(
            engines
                .iter()
                .map(|engine| self.search_engine(engine.as_ref(), query)),
        )
        .await;

        let mut container = ResultContainer::with_sources(sources);
        for (index, (outcome, elapsed)) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(records) => {
                    container.add_results(index, records, elapsed.as_millis() as u64)
                }
                Err(error) => container.add_unresponsive(index, error),
            }
        }

        debug!(
            "Collected {} records before deduplication",
            container.raw_count()
        );

        Ok(container.into_result())
    }

    /// Search a single engine under its timeout
    async fn search_engine(
        &self,
        engine: &dyn Engine,
        query: &SearchQuery,
    ) -> (Result<Vec<SearchRecord>, ProviderError>, Duration) {
        let engine_name = engine.name();
        let start = Instant::now();
        let engine_timeout = self.engine_timeout(engine_name, query);

        debug!(
            "Searching engine {} with timeout {:?}",
            engine_name, engine_timeout
        );

        let result = match timeout(
            engine_timeout,
            engine.fetch(
                &self.client,
                &query.query,
                query.max_results,
                engine_timeout,
            ),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(engine_timeout.as_millis() as u64)),
        };

        let elapsed = start.elapsed();
        match &result {
            Ok(records) => debug!(
                "Engine {} returned {} results in {:?}",
                engine_name,
                records.len(),
                elapsed
            ),
            Err(e) => warn!("Engine {} failed: {}", engine_name, e),
        }

        (result, elapsed)
    }

    fn engine_timeout(&self, engine_name: &str, query: &SearchQuery) -> Duration {
        let seconds = query
            .timeout_limit
            .unwrap_or_else(|| {
                self.registry
                    .get_timeout(engine_name, self.default_timeout.as_secs_f64())
            })
            .min(self.max_timeout.as_secs_f64())
            .max(0.001);
        Duration::from_secs_f64(seconds)
    }
}
