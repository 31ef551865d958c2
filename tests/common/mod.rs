//! Shared fixtures for the integration tests

#![allow(dead_code)]

use search_aggregator::config::Settings;
use search_aggregator::engines::{EngineLoader, EngineRegistry};
use search_aggregator::network::HttpClient;
use search_aggregator::Search;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

pub const GOOGLE_PATH: &str = "/customsearch/v1";
pub const WIKIPEDIA_PATH: &str = "/w/api.php";

/// Default settings with both providers pointed at `server`
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.outgoing.request_timeout = 2.0;
    for engine in &mut settings.engines {
        match engine.engine.as_str() {
            "google" => {
                engine.base_url = Some(format!("{}{}", server.uri(), GOOGLE_PATH));
                engine.api_key = Some("test-key".to_string());
                engine.search_engine_id = Some("test-cx".to_string());
            }
            "wikipedia" => {
                engine.base_url = Some(format!("{}{}", server.uri(), WIKIPEDIA_PATH));
            }
            _ => {}
        }
    }
    settings
}

pub fn registry_for(settings: &Settings) -> EngineRegistry {
    EngineLoader::load(settings).unwrap()
}

pub fn search_for(server: &MockServer) -> Search {
    search_with(&settings_for(server))
}

pub fn search_with(settings: &Settings) -> Search {
    let client = HttpClient::with_settings(&settings.outgoing).unwrap();
    Search::from_settings(client, Arc::new(registry_for(settings)), settings)
}

/// Custom Search JSON body with one item per `(title, link, snippet)`
pub fn google_body(items: &[(&str, &str, &str)]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|(title, link, snippet)| json!({ "title": title, "link": link, "snippet": snippet }))
        .collect();
    json!({ "kind": "customsearch#search", "items": items })
}

/// MediaWiki `list=search` body with one hit per title
pub fn wikipedia_body(titles: &[&str]) -> Value {
    let hits: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| json!({ "ns": 0, "title": title, "pageid": i + 1 }))
        .collect();
    json!({ "batchcomplete": "", "query": { "search": hits } })
}
