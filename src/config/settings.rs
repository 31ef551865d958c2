//! Settings structures for the aggregator configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub engines: Vec<EngineConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            search: SearchSettings::default(),
            server: ServerSettings::default(),
            outgoing: OutgoingSettings::default(),
            engines: default_engines(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Overlay values from a variable lookup
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("AGGREGATOR_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("AGGREGATOR_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("AGGREGATOR_BIND_ADDRESS") {
            self.server.bind_address = val;
        }

        let api_key = lookup("GOOGLE_API_KEY");
        let cse_id = lookup("GOOGLE_CSE_ID");
        if let Some(google) = self.engines.iter_mut().find(|e| e.engine == "google") {
            if api_key.is_some() {
                google.api_key = api_key;
            }
            if cse_id.is_some() {
                google.search_engine_id = cse_id;
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Records requested from each provider
    pub max_results: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: crate::DEFAULT_MAX_RESULTS,
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default per-provider timeout in seconds
    pub request_timeout: f64,
    /// Upper bound for any per-provider timeout
    pub max_request_timeout: f64,
    /// User agent string (none = crate default)
    pub useragent: Option<String>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT,
            max_request_timeout: crate::MAX_TIMEOUT,
            useragent: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Individual engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine name (source identifier)
    pub name: String,
    /// Engine module to use
    pub engine: String,
    /// Whether engine is disabled
    pub disabled: bool,
    /// Custom timeout for this engine
    pub timeout: Option<f64>,
    /// Override the provider endpoint
    pub base_url: Option<String>,
    /// API key if required
    pub api_key: Option<String>,
    /// Google programmable search engine id
    pub search_engine_id: Option<String>,
    /// Wikipedia language edition
    pub language: Option<String>,
}

/// Default engine configurations
fn default_engines() -> Vec<EngineConfig> {
    vec![
        EngineConfig {
            name: "google".to_string(),
            engine: "google".to_string(),
            ..Default::default()
        },
        EngineConfig {
            name: "wikipedia".to_string(),
            engine: "wikipedia".to_string(),
            language: Some("en".to_string()),
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8888);
        assert_eq!(settings.search.max_results, 5);
        assert!(!settings.general.debug);
        assert_eq!(settings.engines.len(), 2);
    }

    #[test]
    fn test_default_engines() {
        let settings = Settings::from_yaml("{}").unwrap();
        let wiki = &settings.engines[1];
        assert_eq!(wiki.name, "wikipedia");
        assert_eq!(wiki.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
search:
  max_results: 8
outgoing:
  request_timeout: 3.0
engines:
  - name: google
    engine: google
    api_key: abc
    search_engine_id: xyz
    timeout: 2.0
  - name: wikipedia
    engine: wikipedia
    disabled: true
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.search.max_results, 8);
        assert_eq!(settings.outgoing.request_timeout, 3.0);
        assert!(settings.engines[1].disabled);

        let google = &settings.engines[0];
        assert_eq!(google.api_key.as_deref(), Some("abc"));
        assert_eq!(google.timeout, Some(2.0));
    }

    #[test]
    fn test_merge_vars() {
        let vars: HashMap<&str, &str> = [
            ("AGGREGATOR_PORT", "9000"),
            ("AGGREGATOR_DEBUG", "true"),
            ("GOOGLE_API_KEY", "env-key"),
            ("GOOGLE_CSE_ID", "env-cx"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::from_yaml("{}").unwrap();
        settings.merge_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.server.port, 9000);
        assert!(settings.general.debug);
        let google = &settings.engines[0];
        assert_eq!(google.api_key.as_deref(), Some("env-key"));
        assert_eq!(google.search_engine_id.as_deref(), Some("env-cx"));
    }
}
