//! Engine traits and types

use crate::error::ProviderError;
use crate::network::HttpClient;
use crate::results::SearchRecord;
use crate::DEFAULT_MAX_RESULTS;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Parameters for building a provider request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestParams {
    /// Search query string, already trimmed
    pub query: String,
    /// Maximum number of records wanted from this provider
    pub max_results: u32,
}

impl RequestParams {
    /// Create new request parameters with the default result cap
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Set the result cap (at least 1)
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Reject blank queries
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.query.trim().is_empty() {
            return Err(ProviderError::InvalidRequest(
                "query must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP GET request to be made for a provider
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: Vec<(String, String)>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: Vec::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Look up a query parameter by name
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl EngineResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ProviderError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`ProviderError::HttpStatus`] unless the status is 2xx
    pub fn error_for_status(&self) -> Result<(), ProviderError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ProviderError::HttpStatus(self.status))
        }
    }
}

/// Adapter trait every search provider implements.
///
/// `request` and `response` are pure so each provider's mapping can be tested
/// without a network; `fetch` glues them together around one HTTP call.
/// Records returned by `response` leave `source` empty; the aggregator stamps
/// it with the identifier the caller requested.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Source identifier, lowercase
    fn name(&self) -> &str;

    /// Short description of the provider
    fn about(&self) -> EngineAbout {
        EngineAbout::default()
    }

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> Result<EngineRequest, ProviderError>;

    /// Map the provider's native response into records
    fn response(
        &self,
        response: EngineResponse,
        params: &RequestParams,
    ) -> Result<Vec<SearchRecord>, ProviderError>;

    /// Query the provider once and return its records in provider order.
    ///
    /// `timeout` bounds the HTTP exchange and replaces the client's default.
    async fn fetch(
        &self,
        client: &HttpClient,
        query: &str,
        max_results: u32,
        timeout: Duration,
    ) -> Result<Vec<SearchRecord>, ProviderError> {
        let params = RequestParams::new(query.trim()).with_max_results(max_results);
        params.validate()?;

        let request = self.request(&params)?;
        let response = client.execute_with_timeout(request, timeout).await?;
        self.response(response, &params)
    }
}

/// Engine metadata
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineAbout {
    /// Website URL
    pub website: Option<String>,
    /// Whether it uses the official API
    pub use_official_api: bool,
    /// Whether an API key is required
    pub require_api_key: bool,
    /// Result format (JSON, XML)
    pub results: String,
}

impl EngineAbout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn official_api(mut self, uses: bool) -> Self {
        self.use_official_api = uses;
        self
    }

    pub fn api_key_required(mut self, required: bool) -> Self {
        self.require_api_key = required;
        self
    }

    pub fn results_format(mut self, format: impl Into<String>) -> Self {
        self.results = format.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_params_defaults() {
        let params = RequestParams::new("cats");
        assert_eq!(params.max_results, 5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_request_params_rejects_blank_query() {
        let params = RequestParams::new("   ");
        assert!(matches!(
            params.validate(),
            Err(ProviderError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_max_results_is_positive() {
        let params = RequestParams::new("cats").with_max_results(0);
        assert_eq!(params.max_results, 1);
    }

    #[test]
    fn test_error_for_status() {
        let ok = EngineResponse {
            status: 204,
            text: String::new(),
            url: "https://example.com".to_string(),
        };
        assert!(ok.error_for_status().is_ok());

        let denied = EngineResponse {
            status: 403,
            text: String::new(),
            url: "https://example.com".to_string(),
        };
        assert_eq!(
            denied.error_for_status(),
            Err(ProviderError::HttpStatus(403))
        );
    }

    #[test]
    fn test_request_builder() {
        let request = EngineRequest::get("https://example.com/api")
            .param("q", "cats")
            .header("Accept", "application/json");
        assert_eq!(request.param_value("q"), Some("cats"));
        assert_eq!(request.param_value("missing"), None);
        assert_eq!(request.headers["Accept"], "application/json");
    }
}
