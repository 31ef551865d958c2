//! Engine loader for building the registry from configuration

use super::google::{Google, GoogleCredentials};
use super::registry::EngineRegistry;
use super::traits::Engine;
use super::wikipedia::Wikipedia;
use crate::config::{EngineConfig, Settings};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing engines from configuration
pub struct EngineLoader;

impl EngineLoader {
    /// Load all enabled engines from settings
    pub fn load(settings: &Settings) -> Result<EngineRegistry> {
        let mut engines = Vec::new();

        for config in &settings.engines {
            if config.disabled {
                info!("Skipping disabled engine: {}", config.name);
                continue;
            }

            match Self::create_engine(&config.engine, config) {
                Ok(engine) => {
                    info!("Loaded engine: {} ({})", config.name, config.engine);
                    engines.push((engine, config.timeout));
                }
                Err(e) => {
                    warn!("Failed to load engine {}: {}", config.name, e);
                }
            }
        }

        let registry = EngineRegistry::with_engines(engines);
        info!("Loaded {} engines", registry.len());
        Ok(registry)
    }

    /// Create an engine instance by type
    fn create_engine(engine_type: &str, config: &EngineConfig) -> Result<Arc<dyn Engine>> {
        let engine: Arc<dyn Engine> = match engine_type {
            "google" => {
                let credentials = GoogleCredentials {
                    api_key: config.api_key.clone(),
                    search_engine_id: config.search_engine_id.clone(),
                };
                if credentials.api_key.is_none() || credentials.search_engine_id.is_none() {
                    warn!("google engine has no credentials; its searches will fail");
                }
                let mut google = Google::new(credentials);
                if let Some(ref url) = config.base_url {
                    google = google.with_base_url(url);
                }
                Arc::new(google)
            }
            "wikipedia" => {
                let mut wikipedia =
                    Wikipedia::new().with_lang(config.language.as_deref().unwrap_or("en"));
                if let Some(ref url) = config.base_url {
                    wikipedia = wikipedia.with_api_url(url);
                }
                Arc::new(wikipedia)
            }
            _ => {
                return Err(anyhow::anyhow!("Unknown engine type: {}", engine_type));
            }
        };

        if engine.name() != config.name {
            return Err(anyhow::anyhow!(
                "engine '{}' must be configured under the name '{}'",
                engine_type,
                engine.name()
            ));
        }

        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let registry = EngineLoader::load(&Settings::default()).unwrap();
        assert_eq!(registry.known(), vec!["google", "wikipedia"]);
    }

    #[test]
    fn test_disabled_engines_are_unknown() {
        let mut settings = Settings::default();
        settings.engines[1].disabled = true;

        let registry = EngineLoader::load(&settings).unwrap();
        assert_eq!(registry.known(), vec!["google"]);
        assert!(registry.resolve("wikipedia").is_err());
    }

    #[test]
    fn test_unknown_engine_type_skipped() {
        let mut settings = Settings::default();
        settings.engines.push(EngineConfig {
            name: "bing".to_string(),
            engine: "bing".to_string(),
            ..Default::default()
        });

        let registry = EngineLoader::load(&settings).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.contains("bing"));
    }

    #[test]
    fn test_renamed_engine_rejected() {
        let mut settings = Settings::default();
        settings.engines[0].name = "web".to_string();

        let registry = EngineLoader::load(&settings).unwrap();
        assert_eq!(registry.known(), vec!["wikipedia"]);
    }

    #[test]
    fn test_timeout_override_carried() {
        let mut settings = Settings::default();
        settings.engines[0].timeout = Some(1.5);

        let registry = EngineLoader::load(&settings).unwrap();
        assert_eq!(registry.get_timeout("google", 5.0), 1.5);
    }
}
