//! Errors raised while loading settings and resolving credentials.

use std::path::PathBuf;

/// Configuration and credential errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The config file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The config file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is neither valid JSON5 nor JSON.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Settings could not be written back as JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// A setting holds a value its validator rejects.
    #[error("invalid value for {key}: {reason}")]
    InvalidSetting {
        /// The setting key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Invalid API settings.
    #[error("invalid API settings: {reason}")]
    InvalidApiSettings {
        /// The reason the settings are invalid.
        reason: String,
    },

    /// No GitHub username or access token could be found.
    #[error("Missing GitHub username or access token")]
    MissingCredentials,

    /// The username or token does not pass its validator.
    #[error("Invalid GitHub username or access token value")]
    InvalidCredentials,

    /// The platform config directory is unknown.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// `gh auth token` could not be started.
    #[error("failed to get GitHub token from gh CLI: {0}")]
    GhAuthFailed(#[source] std::io::Error),

    /// The `gh auth token` command returned an error.
    #[error("gh auth token failed with exit code {code:?}: {stderr}")]
    GhAuthError {
        /// The exit code, if available.
        code: Option<i32>,
        /// The stderr output.
        stderr: String,
    },
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_setting() {
        let err = ConfigError::InvalidSetting {
            key: "github_username",
            reason: "must match [a-zA-Z0-9_]+".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for github_username: must match [a-zA-Z0-9_]+"
        );
    }

    #[test]
    fn error_display_missing_credentials() {
        assert_eq!(
            ConfigError::MissingCredentials.to_string(),
            "Missing GitHub username or access token"
        );
    }
}
