//! Editor client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PAGECRAFT_API_URL` - Base URL of the slot configuration server
//!
//! ## Optional
//! - `PAGECRAFT_API_TOKEN` - Bearer token sent with every request
//! - `PAGECRAFT_AUTOSAVE_DELAY_MS` - Auto-save debounce delay (default: 1500)
//! - `PAGECRAFT_DEFAULTS_CACHE_TTL_SECS` - Lifetime of cached default documents (default: 300)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default debounce delay before an auto-save fires.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1500);

/// Default lifetime of cached default documents.
pub const DEFAULT_DEFAULTS_CACHE_TTL: Duration = Duration::from_secs(300);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Settings for talking to the slot configuration server.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Base URL of the server (e.g. `http://127.0.0.1:3002/`)
    pub api_url: Url,
    /// Bearer token, if the server sits behind authentication
    pub api_token: Option<SecretString>,
    /// Debounce delay for auto-save
    pub autosave_delay: Duration,
    /// How long default documents stay cached
    pub defaults_cache_ttl: Duration,
}

impl EditorConfig {
    /// Configuration for `api_url` with default timings and no token.
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            api_token: None,
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            defaults_cache_ttl: DEFAULT_DEFAULTS_CACHE_TTL,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let raw_url = std::env::var("PAGECRAFT_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("PAGECRAFT_API_URL".to_string()))?;
        let api_url = parse_base_url(&raw_url)?;

        let api_token = std::env::var("PAGECRAFT_API_TOKEN")
            .ok()
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let autosave_delay = parse_duration(
            "PAGECRAFT_AUTOSAVE_DELAY_MS",
            DEFAULT_AUTOSAVE_DELAY,
            Duration::from_millis,
        )?;
        let defaults_cache_ttl = parse_duration(
            "PAGECRAFT_DEFAULTS_CACHE_TTL_SECS",
            DEFAULT_DEFAULTS_CACHE_TTL,
            Duration::from_secs,
        )?;

        Ok(Self {
            api_url,
            api_token,
            autosave_delay,
            defaults_cache_ttl,
        })
    }
}

/// Parse a base URL, making sure it ends with `/` so relative joins keep
/// any path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("PAGECRAFT_API_URL".to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_duration(
    key: &str,
    default: Duration,
    unit: fn(u64) -> Duration,
) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(unit)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
