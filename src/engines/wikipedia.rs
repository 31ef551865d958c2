//! Wikipedia search engine implementation

use super::traits::*;
use crate::error::ProviderError;
use crate::results::SearchRecord;
use serde::Deserialize;

/// Wikipedia full-text search over the MediaWiki action API
pub struct Wikipedia {
    api_url: Option<String>,
    lang: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<QueryBlock>,
    #[serde(default)]
    error: Option<ApiErrorBlock>,
}

/// MediaWiki reports failures (maxlag, bad parameters, rate limits) with a
/// 200 status and this block in place of `query`
#[derive(Debug, Deserialize)]
struct ApiErrorBlock {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct QueryBlock {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
}

impl Wikipedia {
    pub fn new() -> Self {
        Self {
            api_url: None,
            lang: "en".to_string(),
        }
    }

    /// Use another language edition (`de`, `en-US` -> `en`)
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = base_lang(lang).to_string();
        self
    }

    /// Point the engine at a different API endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    fn get_api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/w/api.php", self.lang))
    }

    /// Canonical article URL for a page title
    pub fn article_url(&self, title: &str) -> String {
        let slug = title.trim().replace(' ', "_");
        format!(
            "https://{}.wikipedia.org/wiki/{}",
            self.lang,
            urlencoding::encode(&slug)
        )
    }
}

fn base_lang(lang: &str) -> &str {
    match lang.split('-').next() {
        Some(code) if !code.is_empty() && code != "all" => code,
        _ => "en",
    }
}

impl Default for Wikipedia {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for Wikipedia {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn about(&self) -> EngineAbout {
        EngineAbout::new()
            .website("https://www.wikipedia.org")
            .official_api(true)
            .results_format("JSON")
    }

    fn request(&self, params: &RequestParams) -> Result<EngineRequest, ProviderError> {
        Ok(EngineRequest::get(self.get_api_url())
            .header("Accept", "application/json")
            .param("action", "query")
            .param("list", "search")
            .param("format", "json")
            .param("srsearch", params.query.as_str())
            .param("srlimit", params.max_results.to_string()))
    }

    fn response(
        &self,
        response: EngineResponse,
        params: &RequestParams,
    ) -> Result<Vec<SearchRecord>, ProviderError> {
        response.error_for_status()?;

        let body: ApiResponse = response.json()?;

        if let Some(error) = body.error {
            return Err(ProviderError::Api(format!("{}: {}", error.code, error.info)));
        }
        let query = body
            .query
            .ok_or_else(|| ProviderError::Parse("response has no query block".to_string()))?;

        let records = query
            .search
            .into_iter()
            .filter(|hit| !hit.title.trim().is_empty())
            .take(params.max_results as usize)
            .map(|hit| {
                let link = self.article_url(&hit.title);
                SearchRecord::new(hit.title, link)
            })
            .collect();

        Ok(records)
    }
}
