//! CLI configuration: TOML file with environment overrides

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Top-level configuration loaded from `<config_dir>/jurify/config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Connection settings for the Jurify backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. "https://api.jurify.com.br"
    #[serde(default)]
    pub base_url: String,
    /// Bearer token; empty means unauthenticated requests
    #[serde(default)]
    pub token: String,
}

impl Config {
    /// Load the config file (if present) and apply `JURIFY_API_URL` /
    /// `JURIFY_API_TOKEN` overrides. A `.env` file is honored.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var("JURIFY_API_URL") {
            config.api.base_url = url;
        }
        if let Ok(token) = std::env::var("JURIFY_API_TOKEN") {
            config.api.token = token;
        }

        if config.api.base_url.trim().is_empty() {
            bail!(
                "No API base URL configured. Set JURIFY_API_URL or add [api] base_url to {}",
                path.display()
            );
        }

        Ok(config)
    }

    /// Path of the config file inside the platform config directory
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine the user config directory")?;
        Ok(dir.join("jurify").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            "[api]\nbase_url = \"https://api.jurify.com.br\"\ntoken = \"abc123\"\n",
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.jurify.com.br");
        assert_eq!(config.api.token, "abc123");
    }

    #[test]
    fn test_missing_sections_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.api.base_url.is_empty());
        assert!(config.api.token.is_empty());
    }
}
