//! Configuration for the atlas terminal directory.
//!
//! Defaults, an optional TOML file in the platform config directory, and
//! `ATLAS_*` environment variables, layered with figment and translated to
//! `atlas_core::DirectoryConfig`. Nothing is ever written back.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use atlas_core::{DirectoryConfig, RetryPolicy};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Everything the directory can be told from outside.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Data source returning every country as a JSON array.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts per fetch, first one included.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles for each one after.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Common name selected after every successful fetch.
    #[serde(default = "default_country")]
    pub default_country: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            default_country: default_country(),
        }
    }
}

fn default_endpoint() -> String {
    atlas_core::DEFAULT_ENDPOINT.into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_attempts() -> u32 {
    3
}
fn default_base_delay_ms() -> u64 {
    1000
}
fn default_country() -> String {
    atlas_core::DEFAULT_COUNTRY.into()
}

impl Config {
    /// Validate and convert into the core's runtime configuration.
    pub fn to_directory_config(&self) -> Result<DirectoryConfig, ConfigError> {
        let endpoint: url::Url = self
            .endpoint
            .parse()
            .map_err(|e| ConfigError::Validation {
                field: "endpoint".into(),
                reason: format!("invalid URL {:?}: {e}", self.endpoint),
            })?;

        if self.max_attempts == 0 {
            return Err(ConfigError::Validation {
                field: "max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.default_country.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "default_country".into(),
                reason: "must not be empty".into(),
            });
        }

        Ok(DirectoryConfig {
            endpoint,
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                base_delay: Duration::from_millis(self.base_delay_ms),
            },
            default_country: self.default_country.clone(),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "atlas", "atlas").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("atlas");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file at `path` if it exists, then `ATLAS_*`.
fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ATLAS_"))
}

/// Load the Config from the platform config file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from an explicit file + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}
