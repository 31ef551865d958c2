//! Application state shared across handlers

use crate::config::Settings;
use crate::engines::EngineRegistry;
use crate::network::HttpClient;
use crate::search::Search;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search executor, owning the engine registry
    pub search: Arc<Search>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: EngineRegistry, client: HttpClient) -> Self {
        let search = Search::from_settings(client, Arc::new(registry), &settings);

        Self {
            settings: Arc::new(settings),
            search: Arc::new(search),
        }
    }

    /// Engine registry used by the search executor
    pub fn registry(&self) -> &EngineRegistry {
        self.search.registry()
    }

    /// Per-provider result cap applied when a request names none
    pub fn max_results(&self) -> u32 {
        self.settings.search.max_results
    }
}
