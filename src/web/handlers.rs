//! HTTP request handlers

use super::state::AppState;
use crate::engines::EngineAbout;
use crate::error::SearchError;
use crate::results::{AggregationResult, SearchRecord};
use crate::search::SearchQuery;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// A search request as submitted by either the form or the query string
#[derive(Debug, Default, PartialEq)]
struct SearchInput {
    query: String,
    sources: Vec<String>,
    max_results: Option<u32>,
}

/// Parse an urlencoded form body or query string. `sources` may repeat and
/// each value may itself be comma-separated.
fn parse_search_input(encoded: &str) -> SearchInput {
    let mut input = SearchInput::default();
    for (key, value) in url::form_urlencoded::parse(encoded.as_bytes()) {
        match key.as_ref() {
            "query" | "q" => input.query = value.into_owned(),
            "sources" => input.sources.push(value.into_owned()),
            "max_results" => input.max_results = value.trim().parse().ok(),
            _ => {}
        }
    }
    input
}

/// Error body returned by the search endpoints
#[derive(Debug)]
pub struct ApiError {
    error: SearchError,
    unresponsive_engines: Vec<String>,
}

impl ApiError {
    /// Attach the names of the providers that failed
    pub fn with_unresponsive(mut self, engines: Vec<String>) -> Self {
        self.unresponsive_engines = engines;
        self
    }

    /// 400 for caller mistakes, 404 when nothing was found
    pub fn status(&self) -> StatusCode {
        match self.error {
            SearchError::NoResults { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(error: SearchError) -> Self {
        Self {
            error,
            unresponsive_engines: Vec::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.error {
            error @ SearchError::NoResults { .. } => serde_json::json!({
                "error": "No results found",
                "detail": error.to_string(),
                "unresponsive_engines": self.unresponsive_engines,
            }),
            error => serde_json::json!({ "error": error.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// One entry of `GET /engines`
#[derive(Debug, Serialize)]
pub struct EngineInfo {
    pub name: String,
    #[serde(flatten)]
    pub about: EngineAbout,
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.registry().known()))
}

fn render_index(engines: &[&str]) -> String {
    let checkboxes = engines
        .iter()
        .map(|name| {
            format!(
                r#"<label><input type="checkbox" name="sources" value="{name}" checked> {name}</label>"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Search Aggregator</title>
  </head>
  <body>
    <h1>Search Aggregator</h1>
    <form method="post" action="/search">
      <input type="text" name="query" placeholder="Search..." autofocus>
      {checkboxes}
      <button type="submit">Search</button>
    </form>
  </body>
</html>
"#
    )
}

/// `POST /search` with an urlencoded form body
pub async fn search_form(State(state): State<AppState>, body: String) -> Response {
    run_search(&state, parse_search_input(&body)).await
}

/// `GET /search?q=...&sources=...`
pub async fn search_query(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    run_search(&state, parse_search_input(query.as_deref().unwrap_or_default())).await
}

async fn run_search(state: &AppState, input: SearchInput) -> Response {
    match aggregate(state, input).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn aggregate(state: &AppState, input: SearchInput) -> Result<Vec<SearchRecord>, ApiError> {
    let query = SearchQuery::new(input.query, input.sources)
        .with_max_results(input.max_results.unwrap_or_else(|| state.max_results()));

    let result = state.search.execute(&query).await.map_err(|e| {
        tracing::debug!("Rejected search request: {}", e);
        ApiError::from(e)
    })?;

    let unresponsive: Vec<String> = result
        .unresponsive
        .iter()
        .map(|engine| engine.name.clone())
        .collect();

    result
        .require_results()
        .map(AggregationResult::into_records)
        .map_err(|e| ApiError::from(e).with_unresponsive(unresponsive))
}

/// List the configured engines
pub async fn engines(State(state): State<AppState>) -> Json<Vec<EngineInfo>> {
    let engines = state
        .registry()
        .engines()
        .map(|engine| EngineInfo {
            name: engine.name().to_string(),
            about: engine.about(),
        })
        .collect();
    Json(engines)
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::results::UnresponsiveEngine;

    #[test]
    fn test_parse_repeated_sources() {
        let input =
            parse_search_input("query=rust+lang&sources=google&sources=Wikipedia&max_results=3");
        assert_eq!(
            input,
            SearchInput {
                query: "rust lang".to_string(),
                sources: vec!["google".to_string(), "Wikipedia".to_string()],
                max_results: Some(3),
            }
        );
    }

    #[test]
    fn test_parse_query_string_form() {
        let input = parse_search_input("q=cats&sources=google%2Cwikipedia");
        assert_eq!(input.query, "cats");
        assert_eq!(input.sources, vec!["google,wikipedia".to_string()]);
        assert_eq!(input.max_results, None);
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let input = parse_search_input("query=cats&theme=dark&max_results=lots");
        assert_eq!(input.query, "cats");
        assert!(input.sources.is_empty());
        assert_eq!(input.max_results, None);
        assert_eq!(parse_search_input(""), SearchInput::default());
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            ApiError::from(SearchError::EmptyQuery).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(SearchError::NoSourceSelected).status(),
            StatusCode::BAD_REQUEST
        );

        let result = AggregationResult {
            unresponsive: vec![UnresponsiveEngine {
                name: "google".to_string(),
                error: ProviderError::HttpStatus(500),
            }],
            requested: 1,
            ..Default::default()
        };
        let error = ApiError::from(result.require_results().unwrap_err())
            .with_unresponsive(vec!["google".to_string()]);
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.unresponsive_engines, vec!["google".to_string()]);
        assert_eq!(
            error.error.to_string(),
            "No results found (all 1 providers failed)"
        );
    }

    #[test]
    fn test_index_lists_engines() {
        let html = render_index(&["google", "wikipedia"]);
        assert!(html.contains(r#"value="google""#));
        assert!(html.contains(r#"value="wikipedia""#));
        assert!(html.contains(r#"action="/search""#));
    }
}
