//! Run configuration
//!
//! Everything here has a default, so an empty `{}` config file is valid.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Settings for the blocking HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Sent with every request, in this order.
    pub headers: IndexMap<String, String>,
    /// Global per-request timeout. `None` leaves the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let mut headers = IndexMap::new();
        headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());
        headers.insert(
            "Accept".to_string(),
            "text/html,application/xhtml+xml,image/*,*/*;q=0.8".to_string(),
        );
        Self {
            headers,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub fetch: FetchConfig,
    /// Where the aggregated document is written.
    pub output_path: PathBuf,
    /// Root of the `logos/` and `partners/` asset trees.
    pub asset_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            output_path: PathBuf::from("data/data.json"),
            asset_root: PathBuf::from("data"),
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.output_path, PathBuf::from("data/data.json"));
        assert_eq!(config.asset_root, PathBuf::from("data"));
        assert_eq!(config.fetch.headers["User-Agent"], DEFAULT_USER_AGENT);
        assert_eq!(config.fetch.timeout_secs, None);
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"headers": {"User-Agent": "test-agent"}, "timeout_secs": 5, "output_path": "out/brands.json"}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.fetch.headers.len(), 1);
        assert_eq!(config.fetch.headers["User-Agent"], "test-agent");
        assert_eq!(config.fetch.timeout_secs, Some(5));
        assert_eq!(config.output_path, PathBuf::from("out/brands.json"));
        assert_eq!(config.asset_root, PathBuf::from("data"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
