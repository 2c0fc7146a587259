//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.careboard.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dataset settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Text output settings.
    #[serde(default)]
    pub render: RenderConfig,
}

/// Dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the dataset snapshot.
    #[serde(default = "default_data")]
    pub data: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data: default_data(),
        }
    }
}

fn default_data() -> PathBuf {
    PathBuf::from("data/sample.json")
}

/// Text output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Cap per-review listings in text output; omit to list all.
    #[serde(default)]
    pub max_reviews: Option<usize>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".careboard.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // The --data flag and the CAREBOARD_DATA env var both arrive here
        if let Some(ref data) = args.data {
            self.store.data = data.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Args, Command, OutputFormat};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.data, PathBuf::from("data/sample.json"));
        assert!(config.render.max_reviews.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[store]
data = "snapshots/newark.json"

[render]
max_reviews = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.store.data, PathBuf::from("snapshots/newark.json"));
        assert_eq!(config.render.max_reviews, Some(10));
    }

    #[test]
    fn test_merge_prefers_cli_data_path() {
        let mut config = Config::default();
        let args = Args {
            command: Some(Command::Compare),
            data: Some(PathBuf::from("other.json")),
            config: None,
            format: OutputFormat::Text,
            verbose: false,
            quiet: false,
            init_config: false,
        };
        config.merge_with_args(&args);
        assert_eq!(config.store.data, PathBuf::from("other.json"));

        let mut config = Config::default();
        let args = Args { data: None, ..args };
        config.merge_with_args(&args);
        assert_eq!(config.store.data, PathBuf::from("data/sample.json"));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("data"));
    }
}
