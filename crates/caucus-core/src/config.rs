use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::locator::{DEFAULT_BILL_PATH, DEFAULT_HOST, DEFAULT_SCHEME};
use crate::api::{ApiLocator, RetryPolicy};

/// Edge weight at or below which edges are ignored for centrality.
pub const DEFAULT_CENTRALITY_TRIM: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaucusConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_bill_path")]
    pub bill_path: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            bill_path: default_bill_path(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl ApiConfig {
    /// Listing locator for the configured bill endpoint.
    #[must_use]
    pub fn locator(&self) -> ApiLocator {
        ApiLocator::new(self.host.clone())
            .with_scheme(self.scheme.clone())
            .with_path(self.bill_path.clone())
    }

    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding `{congress}_{chamber}.json` files. Defaults to the
    /// platform cache directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl CacheConfig {
    /// Configured directory, else `<platform cache dir>/caucus`, else
    /// `./.cache`.
    #[must_use]
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::cache_dir().map_or_else(|| PathBuf::from(".cache"), |dir| dir.join("caucus"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_centrality_trim")]
    pub centrality_trim: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            centrality_trim: default_centrality_trim(),
        }
    }
}

/// Load configuration from `explicit`, or from the user config directory.
/// A missing file yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>) -> Result<CaucusConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(config_dir) = dirs::config_dir() else {
                return Ok(CaucusConfig::default());
            };
            config_dir.join("caucus/config.toml")
        }
    };

    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        return Ok(CaucusConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<CaucusConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_bill_path() -> String {
    DEFAULT_BILL_PATH.to_string()
}

fn default_user_agent() -> String {
    format!("caucus/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_centrality_trim() -> u32 {
    DEFAULT_CENTRALITY_TRIM
}
