//! HTTP client for making requests to search providers

use crate::config::OutgoingSettings;
use crate::engines::{EngineRequest, EngineResponse};
use crate::error::ProviderError;
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client wrapper configured from [`OutgoingSettings`]
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> anyhow::Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> anyhow::Result<Self> {
        let default_timeout = Duration::from_secs_f64(settings.request_timeout.max(0.1));

        let mut builder = Client::builder()
            .timeout(default_timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout,
            user_agent: settings
                .useragent
                .clone()
                .unwrap_or_else(default_user_agent),
        })
    }

    /// Execute a provider request
    pub async fn execute(&self, request: EngineRequest) -> Result<EngineResponse, ProviderError> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute a provider request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: EngineRequest,
        timeout: Duration,
    ) -> Result<EngineResponse, ProviderError> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(timeout)
            .header("User-Agent", &self.user_agent);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| classify_error(e, timeout))?;

        Self::parse_response(response, timeout).await
    }

    /// Parse response into EngineResponse
    async fn parse_response(
        response: Response,
        timeout: Duration,
    ) -> Result<EngineResponse, ProviderError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response
            .text()
            .await
            .map_err(|e| classify_error(e, timeout))?;

        Ok(EngineResponse { status, text, url })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn default_user_agent() -> String {
    format!("search-aggregator/{}", crate::VERSION)
}

fn classify_error(err: reqwest::Error, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout.as_millis() as u64)
    } else if err.is_decode() || err.is_body() {
        ProviderError::Parse(err.to_string())
    } else {
        ProviderError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
        assert!(client.unwrap().user_agent().starts_with("search-aggregator/"));
    }

    #[tokio::test]
    async fn test_custom_user_agent() {
        let settings = OutgoingSettings {
            useragent: Some("TestBot/1.0".to_string()),
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        assert_eq!(client.user_agent(), "TestBot/1.0");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = HttpClient::new().unwrap();
        let request = EngineRequest::get("http://127.0.0.1:9/unreachable");
        let err = client.execute(request).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Network(_) | ProviderError::Timeout(_)
        ));
    }
}
