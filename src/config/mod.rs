//! Configuration module
//!
//! Handles loading settings from YAML files and environment variables. The
//! resulting [`Settings`] value is passed explicitly to whatever needs it;
//! provider credentials reach the adapters through [`EngineConfig`].

mod settings;

pub use settings::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming a settings file
pub const SETTINGS_PATH_VAR: &str = "AGGREGATOR_SETTINGS_PATH";

/// Load settings from an explicit path, the environment, a default location,
/// or fall back to defaults. Environment overrides are applied in every case.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        info!("Loading settings from: {}", path.display());
        let mut settings = Settings::from_file(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        settings.merge_env();
        return Ok(settings);
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    for path in default_paths() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("search-aggregator/settings.yml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = load_settings(Some(Path::new("/nonexistent/settings.yml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_paths_include_cwd() {
        let paths = default_paths();
        assert_eq!(paths[0], PathBuf::from("settings.yml"));
    }
}
