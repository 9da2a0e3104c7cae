//! GitHub API endpoint settings.
//!
//! This module provides the [`ApiSettings`] type which controls where the
//! Gist client sends requests and how long it waits for a reply.
//!
//! # Timeouts
//!
//! Every request carries an explicit timeout, 30 seconds by default, bounded to:
//!
//! - Minimum: 1 second
//! - Maximum: 300 seconds (5 minutes)

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// The public GitHub REST API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimum allowed request timeout (1 second).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum allowed request timeout (5 minutes).
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Settings for talking to the GitHub API.
///
/// # Examples
///
/// ```
/// use gistpress_config::ApiSettings;
///
/// let settings = ApiSettings::default();
/// assert_eq!(settings.base_url, "https://api.github.com");
/// assert_eq!(settings.timeout_secs, 30);
///
/// // GitHub Enterprise
/// let settings = ApiSettings::with_base_url("https://github.example.com/api/v3");
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// The API root URL, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// The request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiSettings {
    /// Creates settings pointing at a different API root, keeping the default timeout.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Returns a copy of these settings with the given timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an `http(s)` URL or the
    /// timeout is outside `MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS`.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidApiSettings {
                reason: format!("base_url must be an http(s) URL, got {url:?}"),
            });
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::InvalidApiSettings {
                reason: format!(
                    "timeout_secs must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS}, got {}",
                    self.timeout_secs
                ),
            });
        }

        Ok(())
    }
}
