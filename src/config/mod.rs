//! Configuration management for feedloom.
//!
//! Configuration is read from `~/.config/feedloom/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub aggregation: AggregationConfig,
}

/// Connection settings for the remote content API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// User agent string sent with every request
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/".to_string(),
            timeout_secs: 10,
            user_agent: concat!("feedloom/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Limits applied while composing cards.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Maximum number of cards composed at the same time (default: 16)
    pub max_concurrency: usize,

    /// Number of posts requested per feed page (default: 10)
    pub page_size: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: crate::aggregator::DEFAULT_CONCURRENCY,
            page_size: 10,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse { path, source: e })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/feedloom/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("feedloom").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# feedloom configuration

[api]
# Base URL of the content API; endpoint paths are joined onto it
base_url = "http://localhost:8080/api/"

# Request timeout in seconds. A timed out fetch is treated like any other
# failed fetch: the card falls back to placeholder values.
timeout_secs = 10

[aggregation]
# Maximum number of cards composed concurrently
max_concurrency = 16

# Posts requested per feed page
page_size = 10
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
