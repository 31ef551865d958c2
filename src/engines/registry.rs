//! Engine registry mapping source identifiers to adapters

use super::traits::Engine;
use crate::error::SearchError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A registered engine plus its timeout override
struct Entry {
    engine: Arc<dyn Engine>,
    timeout: Option<f64>,
}

/// Fixed set of available search engines.
///
/// The set is decided when the registry is built; there is no way to add an
/// engine afterwards.
pub struct EngineRegistry {
    engines: BTreeMap<String, Entry>,
}

impl EngineRegistry {
    /// Build a registry from engines and their optional timeout overrides
    pub fn with_engines<I>(engines: I) -> Self
    where
        I: IntoIterator<Item = (Arc<dyn Engine>, Option<f64>)>,
    {
        let engines = engines
            .into_iter()
            .map(|(engine, timeout)| {
                let name = normalize_identifier(engine.name());
                (name, Entry { engine, timeout })
            })
            .collect();

        Self { engines }
    }

    /// Look up an engine by identifier (trimmed, case-insensitive)
    pub fn resolve(&self, identifier: &str) -> Result<Arc<dyn Engine>, SearchError> {
        let name = normalize_identifier(identifier);
        self.engines
            .get(&name)
            .map(|entry| entry.engine.clone())
            .ok_or_else(|| SearchError::UnknownSource {
                identifier: identifier.trim().to_string(),
                known: self.known().into_iter().map(String::from).collect(),
            })
    }

    /// All known identifiers, sorted
    pub fn known(&self) -> Vec<&str> {
        self.engines.keys().map(|s| s.as_str()).collect()
    }

    /// Iterate over the registered engines in identifier order
    pub fn engines(&self) -> impl Iterator<Item = &Arc<dyn Engine>> {
        self.engines.values().map(|entry| &entry.engine)
    }

    /// Check if an identifier is known
    pub fn contains(&self, identifier: &str) -> bool {
        self.engines.contains_key(&normalize_identifier(identifier))
    }

    /// Get number of registered engines
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Get effective timeout for an engine in seconds
    pub fn get_timeout(&self, identifier: &str, default: f64) -> f64 {
        self.engines
            .get(&normalize_identifier(identifier))
            .and_then(|entry| entry.timeout)
            .unwrap_or(default)
    }
}

/// Trim and lowercase a source identifier
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::google::{Google, GoogleCredentials};
    use crate::engines::wikipedia::Wikipedia;

    fn registry() -> EngineRegistry {
        EngineRegistry::with_engines([
            (
                Arc::new(Google::new(GoogleCredentials::default())) as Arc<dyn Engine>,
                Some(2.5),
            ),
            (Arc::new(Wikipedia::new()) as Arc<dyn Engine>, None),
        ])
    }

    #[test]
    fn test_registry() {
        let registry = registry();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.known(), vec!["google", "wikipedia"]);
        assert!(registry.contains("google"));
        assert!(!registry.contains("bing"));
    }

    #[test]
    fn test_resolve_is_trimmed_and_case_insensitive() {
        let registry = registry();

        assert_eq!(registry.resolve("google").unwrap().name(), "google");
        assert_eq!(registry.resolve("  Wikipedia ").unwrap().name(), "wikipedia");
        assert_eq!(registry.resolve("GOOGLE").unwrap().name(), "google");
    }

    #[test]
    fn test_resolve_unknown() {
        let err = registry().resolve(" bing ").err().unwrap();
        assert_eq!(
            err,
            SearchError::UnknownSource {
                identifier: "bing".to_string(),
                known: vec!["google".to_string(), "wikipedia".to_string()],
            }
        );
    }

    #[test]
    fn test_timeouts() {
        let registry = registry();
        assert_eq!(registry.get_timeout("google", 9.0), 2.5);
        assert_eq!(registry.get_timeout("wikipedia", 9.0), 9.0);
        assert_eq!(registry.get_timeout("bing", 9.0), 9.0);
    }
}
