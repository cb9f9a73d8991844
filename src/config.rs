//! Client configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! The API origin is the only setting the request core depends on. Timeouts
//! are handed to the transport; the request hook itself never times out.

use std::time::Duration;

use crate::error::ErrorCode;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The API origin is not an absolute http(s) URL.
    #[error("invalid API origin '{0}' (expected http:// or https://)")]
    InvalidOrigin(String),

    /// A numeric setting could not be parsed.
    #[error("invalid value for {key}: '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidOrigin(_) => "E_CONFIG_ORIGIN",
            Self::InvalidNumber { .. } => "E_CONFIG_NUMBER",
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin without a trailing slash, e.g. `http://localhost:8080`.
    pub api_url: String,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a config for `api_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not an http(s) URL.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { api_url: normalize_origin(api_url)?, timeouts: Timeouts::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `SHARE_PLACES_API_URL`: default `http://localhost:8080`
    /// - `SHARE_PLACES_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SHARE_PLACES_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if any present variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("SHARE_PLACES_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeouts = Timeouts {
            request_secs: parse_u64(
                "SHARE_PLACES_REQUEST_TIMEOUT_SECS",
                lookup("SHARE_PLACES_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_u64(
                "SHARE_PLACES_CONNECT_TIMEOUT_SECS",
                lookup("SHARE_PLACES_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self { api_url: normalize_origin(&api_url)?, timeouts })
    }

    /// Absolute URL for an API path such as `/api/users`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Absolute URL for a server-relative asset path (user avatars, place images).
    #[must_use]
    pub fn asset_url(&self, relative: &str) -> String {
        self.endpoint(relative)
    }
}

fn normalize_origin(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed.split_once("://").is_some_and(|(_, rest)| !rest.is_empty());
    if !has_scheme || !has_host {
        return Err(ConfigError::InvalidOrigin(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn parse_u64(key: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
