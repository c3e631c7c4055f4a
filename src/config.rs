//! Application configuration
//!
//! The only tunable is the analysis endpoint. Resolution order: the
//! `PIPEFLOW_ANALYZE_URL` environment variable, then a JSON config file
//! under the platform config directory, then the built-in default. A
//! missing or malformed file degrades to defaults with a warning.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default analysis endpoint (local backend)
pub const DEFAULT_ANALYZE_URL: &str = "http://localhost:8000/pipelines/parse";

/// Environment variable overriding the endpoint
pub const ANALYZE_URL_ENV: &str = "PIPEFLOW_ANALYZE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_analyze_url")]
    pub analyze_url: String,
}

fn default_analyze_url() -> String {
    DEFAULT_ANALYZE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyze_url: default_analyze_url(),
        }
    }
}

impl Config {
    /// Loads the effective configuration
    pub fn load() -> Self {
        if let Ok(url) = std::env::var(ANALYZE_URL_ENV) {
            debug!("analyze endpoint from {}: {}", ANALYZE_URL_ENV, url);
            return Self { analyze_url: url };
        }

        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_json(&contents),
            Err(_) => {
                debug!("no config file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parses a config document, falling back to defaults when malformed
    pub fn from_json(contents: &str) -> Self {
        match serde_json::from_str(contents) {
            Ok(config) => config,
            Err(err) => {
                warn!("malformed config file ({}), using defaults", err);
                Self::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pipeflow").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(Config::default().analyze_url, DEFAULT_ANALYZE_URL);
    }

    #[test]
    fn file_contents_override_default() {
        let config = Config::from_json(r#"{"analyze_url": "http://example.com/parse"}"#);
        assert_eq!(config.analyze_url, "http://example.com/parse");
    }

    #[test]
    fn malformed_file_degrades_to_default() {
        let config = Config::from_json("{not json");
        assert_eq!(config.analyze_url, DEFAULT_ANALYZE_URL);
    }

    #[test]
    fn missing_key_falls_back_per_field() {
        let config = Config::from_json("{}");
        assert_eq!(config.analyze_url, DEFAULT_ANALYZE_URL);
    }
}
