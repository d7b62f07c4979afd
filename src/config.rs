use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Defaults loaded from an optional TOML config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace assumed when a command does not name one.
    pub namespace: Option<String>,

    /// Per-pod deadline for bulk log fetches, in seconds.
    pub log_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: None,
            log_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load from the given path; no path means built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Resolve a namespace argument against the configured default.
    pub fn namespace_or(&self, explicit: Option<String>) -> String {
        explicit
            .or_else(|| self.namespace.clone())
            .unwrap_or_default()
    }

    pub fn log_timeout(&self) -> Duration {
        Duration::from_secs(self.log_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.namespace, None);
        assert_eq!(config.log_timeout_secs, 30);
    }

    #[test]
    fn test_file_overrides() {
        let config: Config =
            toml::from_str("namespace = \"staging\"\nlog_timeout_secs = 5\n").unwrap();
        assert_eq!(config.namespace.as_deref(), Some("staging"));
        assert_eq!(config.log_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("namespace = \"staging\"").unwrap();
        assert_eq!(config.log_timeout_secs, 30);
    }

    #[test]
    fn test_namespace_fallback() {
        let config: Config = toml::from_str("namespace = \"staging\"").unwrap();
        assert_eq!(config.namespace_or(None), "staging");
        assert_eq!(config.namespace_or(Some("prod".into())), "prod");
        assert_eq!(Config::default().namespace_or(None), "");
    }
}
