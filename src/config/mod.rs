//! Configuration management for Tokenscope
//!
//! Settings are layered: built-in defaults, then an optional
//! `tokenscope.toml` in the working directory, then `TOKENSCOPE_*`
//! environment variables. Only transport policy lives here - everything
//! about enumeration depth is fixed by design, not configurable.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration file name
pub const CONFIG_FILE: &str = "tokenscope.toml";

/// Main configuration structure for Tokenscope
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenscopeConfig {
    /// Remote API client settings
    pub api: ApiConfig,
}

/// Settings for the GitHub API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    format!("tokenscope/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Per-call timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl TokenscopeConfig {
    /// Load configuration from the default locations.
    ///
    /// Missing files are fine; defaults cover everything.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from an explicit file path plus env overrides.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        Figment::from(Serialized::defaults(TokenscopeConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TOKENSCOPE_").split("__"))
            .extract()
            .context("Failed to load tokenscope configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = TokenscopeConfig::default();
        assert_eq!(config.api.base_url, "https://api.github.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.user_agent.starts_with("tokenscope/"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = TokenscopeConfig::load_from("/nonexistent/tokenscope.toml")
            .expect("missing file should not fail");
        assert_eq!(config.api.base_url, "https://api.github.com");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[api]\nbase_url = \"https://github.example.com/api/v3\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = TokenscopeConfig::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://github.example.com/api/v3");
        assert_eq!(config.api.timeout().as_secs(), 5);
        // Unset fields keep their defaults
        assert!(config.api.user_agent.starts_with("tokenscope/"));
    }
}
