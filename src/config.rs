//! Client configuration, with defaults matching the public Frost service.

use crate::events::detector::EventConfig;
use crate::utils::get_cache_dir;
use bon::Builder;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://frost.met.no/observations/v0.jsonld";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const ENV_CLIENT_ID: &str = "FROST_CLIENT_ID";
pub const ENV_ENDPOINT: &str = "FROST_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "FROST_TIMEOUT_SECS";
pub const ENV_HURRICANE_THRESHOLD: &str = "FROST_HURRICANE_THRESHOLD";
pub const ENV_CACHE_DIR: &str = "FROST_CACHE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}

/// Settings for [`crate::Frost`].
///
/// # Examples
///
/// ```
/// use frost_events::{EventConfig, FrostConfig};
///
/// let config = FrostConfig::builder()
///     .client_id("my-client-id")
///     .events(EventConfig::builder().threshold(28.5).build())
///     .build();
///
/// assert_eq!(config.endpoint, "https://frost.met.no/observations/v0.jsonld");
/// assert_eq!(config.events.threshold, 28.5);
/// assert!(config.cache_dir.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct FrostConfig {
    #[builder(into, default = DEFAULT_ENDPOINT.to_string())]
    pub endpoint: String,
    /// Sent as the basic-auth user name when present.
    #[builder(into)]
    pub client_id: Option<String>,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    /// Default detection settings for [`crate::Frost::hurricane_events`].
    #[builder(default)]
    pub events: EventConfig,
    /// Parquet cache location. `None` disables caching.
    #[builder(into)]
    pub cache_dir: Option<PathBuf>,
}

impl Default for FrostConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FrostConfig {
    /// Reads settings from the process environment, loading a `.env` file first if present.
    ///
    /// Recognised variables: `FROST_CLIENT_ID`, `FROST_ENDPOINT`, `FROST_TIMEOUT_SECS`,
    /// `FROST_HURRICANE_THRESHOLD` and `FROST_CACHE_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = FrostConfig {
            client_id: get(ENV_CLIENT_ID),
            cache_dir: get(ENV_CACHE_DIR).map(PathBuf::from),
            ..FrostConfig::default()
        };

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = get(ENV_HURRICANE_THRESHOLD) {
            config.events.threshold = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite())
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_HURRICANE_THRESHOLD,
                    value: raw.clone(),
                })?;
        }
        Ok(config)
    }

    /// Enables caching in the platform cache directory (e.g. `~/.cache/frost_events_cache`).
    pub fn with_default_cache_dir(mut self) -> Result<Self, ConfigError> {
        self.cache_dir = Some(get_cache_dir().map_err(ConfigError::CacheDirResolution)?);
        Ok(self)
    }
}
