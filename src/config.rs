//! Configuration file handling.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/depsweep/config.toml`
//! - macOS: `~/Library/Application Support/depsweep/config.toml`
//! - Windows: `%APPDATA%\depsweep\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! feed_url = "https://example.com/compromised.csv"
//! default_format = "table"
//! default_mode = "exhaustive"
//!
//! [ignore]
//! patterns = ["false-positive-pkg"]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::feed::DEFAULT_FEED_URL;

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use depsweep::Config;
///
/// let config = Config::load().unwrap();
/// println!("Feed URL: {}", config.feed_url);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the compromised-package feed is fetched from.
    pub feed_url: String,

    /// Default output format when no `--format` flag is provided.
    ///
    /// Valid values: "table", "json"
    pub default_format: String,

    /// Default check mode when no `--mode` flag is provided.
    ///
    /// Valid values: "shallow", "exhaustive"
    pub default_mode: String,

    /// Ignore list for suppressing known false positives.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Feed entries to drop before scanning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Package names removed from the pattern list (exact match).
    pub patterns: Vec<String>,
}

impl IgnoreConfig {
    /// Check if a pattern should be dropped from the scan.
    pub fn should_ignore(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p == pattern)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            default_format: "table".to_string(),
            default_mode: "exhaustive".to_string(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depsweep")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.default_format, "table");
        assert_eq!(config.default_mode, "exhaustive");
        assert!(config.ignore.patterns.is_empty());
    }

    #[test]
    fn test_ignore_exact_match_only() {
        let config = IgnoreConfig {
            patterns: vec!["lodash".to_string()],
        };

        assert!(config.should_ignore("lodash"));
        assert!(!config.should_ignore("lodash-es"));
        assert!(!config.should_ignore("underscore"));
    }

    #[test]
    fn test_config_roundtrip_through_toml() {
        let mut config = Config::default();
        config.default_mode = "shallow".to_string();
        config.ignore.patterns.push("chalk".to_string());

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.default_mode, "shallow");
        assert_eq!(parsed.ignore.patterns, vec!["chalk"]);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(toml::from_str::<Config>("default_mode = [1, 2]").is_err());
        assert!(toml::from_str::<Config>("not toml at all {{").is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("default_mode = \"shallow\"").unwrap();
        assert_eq!(parsed.default_mode, "shallow");
        assert_eq!(parsed.default_format, "table");
        assert_eq!(parsed.feed_url, DEFAULT_FEED_URL);
    }
}
