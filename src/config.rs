//! Configuration management for sentiscope using the prefer crate.
//!
//! Config files are discovered with `prefer`, then parsed with serde by
//! extension (TOML, YAML, or JSON). Environment variables are layered on
//! through each section's `Default`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm::LlmConfig;
use crate::services::sentiment::SentimentConfig;

/// Name used for config discovery (`sentiscope.toml`, `sentiscope.yaml`, ...).
pub const CONFIG_NAME: &str = "sentiscope";

/// Errors loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {format} config {}: {message}", path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model service settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Chunking, timeouts and concurrency.
    #[serde(default)]
    pub sentiment: SentimentConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    ///
    /// Falls back to defaults (with env overrides) when no file is found or
    /// the discovered file cannot be parsed.
    pub async fn load() -> Self {
        let discovered = match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => pref_config.source_path().map(|p| p.to_path_buf()),
            Err(_) => None,
        };

        let Some(path) = discovered else {
            debug!("No config file found, using defaults");
            return Self::default();
        };

        match Self::load_from_path(&path).await {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load from an explicit path if given, otherwise discover.
    pub async fn load_with_override(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path).await,
            None => Ok(Self::load().await),
        }
    }

    /// Load configuration from a specific file path.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_err = |format: &'static str, message: String| ConfigError::Parse {
            path: path.clone(),
            format,
            message,
        };

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| parse_err("TOML", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_err("YAML", e.to_string()))?
            }
            _ => serde_json::from_str(&contents).map_err(|e| parse_err("JSON", e.to_string()))?,
        };

        // Sections present in the file bypass `Default`, so layer env on again.
        config.llm = config.llm.with_env_overrides();
        config.sentiment = config.sentiment.with_env_overrides();

        debug!("Loaded config from {}", path.display());
        config.source_path = Some(path);
        Ok(config)
    }

    /// Effective configuration as TOML, with the API key redacted.
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut out = toml::to_string_pretty(self)?;
        if self.llm.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
            out.push_str("\n# llm.api_key is set (redacted)\n");
        }
        Ok(out)
    }
}
