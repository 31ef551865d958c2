//! Google Custom Search engine implementation

use super::traits::*;
use crate::error::ProviderError;
use crate::results::SearchRecord;
use serde::Deserialize;

/// Default Custom Search JSON API endpoint
pub const GOOGLE_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// The API refuses `num` above this
const MAX_NUM: u32 = 10;

/// Credentials for the Custom Search JSON API
#[derive(Debug, Clone, Default)]
pub struct GoogleCredentials {
    /// API key (`key` parameter)
    pub api_key: Option<String>,
    /// Programmable search engine id (`cx` parameter)
    pub search_engine_id: Option<String>,
}

impl GoogleCredentials {
    pub fn new(api_key: impl Into<String>, search_engine_id: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            search_engine_id: Some(search_engine_id.into()),
        }
    }
}

/// Google web search through the Custom Search JSON API
pub struct Google {
    base_url: String,
    credentials: GoogleCredentials,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

impl Google {
    pub fn new(credentials: GoogleCredentials) -> Self {
        Self {
            base_url: GOOGLE_API_URL.to_string(),
            credentials,
        }
    }

    /// Point the engine at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn credentials(&self) -> Result<(&str, &str), ProviderError> {
        let key = self
            .credentials
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::MissingCredentials("google api key".to_string()))?;
        let cx = self
            .credentials
            .search_engine_id
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ProviderError::MissingCredentials("google search engine id".to_string())
            })?;
        Ok((key, cx))
    }
}

impl Engine for Google {
    fn name(&self) -> &str {
        "google"
    }

    fn about(&self) -> EngineAbout {
        EngineAbout::new()
            .website("https://www.google.com")
            .official_api(true)
            .api_key_required(true)
            .results_format("JSON")
    }

    fn request(&self, params: &RequestParams) -> Result<EngineRequest, ProviderError> {
        let (key, cx) = self.credentials()?;

        Ok(EngineRequest::get(&self.base_url)
            .header("Accept", "application/json")
            .param("q", params.query.as_str())
            .param("key", key)
            .param("cx", cx)
            .param("num", params.max_results.min(MAX_NUM).to_string()))
    }

    fn response(
        &self,
        response: EngineResponse,
        params: &RequestParams,
    ) -> Result<Vec<SearchRecord>, ProviderError> {
        response.error_for_status()?;

        let body: SearchResponse = response.json()?;

        let records = body
            .items
            .into_iter()
            .filter_map(|item| {
                let link = item.link.filter(|l| !l.is_empty())?;
                let mut record = SearchRecord::new(item.title, link);
                if let Some(snippet) = item.snippet {
                    record = record.with_snippet(snippet);
                }
                Some(record)
            })
            .take(params.max_results as usize)
            .collect();

        Ok(records)
    }
}
