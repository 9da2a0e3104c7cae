//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for gistpress.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::ApiSettings;
use crate::error::Result;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::settings::{self, ENABLED_POST_TYPES, GITHUB_ACCESS_TOKEN, GITHUB_USERNAME};

/// The post type synced when none is configured.
pub const DEFAULT_POST_TYPE: &str = "post";

/// GitHub account settings.
///
/// Both values may be left out of the file and supplied through the
/// environment instead; see [`crate::auth`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubSettings {
    /// The GitHub username.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    /// The personal access token used for gist requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl GitHubSettings {
    /// Creates settings with both a username and a token.
    #[must_use]
    pub fn new(username: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            access_token: Some(access_token.into()),
        }
    }
}

/// The main configuration struct for gistpress.
///
/// # Examples
///
/// ```
/// use gistpress_config::{Config, GitHubSettings};
///
/// let config = Config::default();
/// assert_eq!(config.enabled_post_types, vec!["post".to_string()]);
///
/// let config = Config {
///     github: GitHubSettings::new("octocat", "ghp_xxx"),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub account settings.
    #[serde(default)]
    pub github: GitHubSettings,

    /// API endpoint settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Post types that are mirrored into gists.
    #[serde(default = "default_post_types")]
    pub enabled_post_types: Vec<String>,

    /// Directory holding per-post sync state.
    ///
    /// Defaults to the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_post_types() -> Vec<String> {
    vec![DEFAULT_POST_TYPE.to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubSettings::default(),
            api: ApiSettings::default(),
            enabled_post_types: default_post_types(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./gistpress.json5` or `./gistpress.json`
    /// 2. User: `~/.config/gistpress/config.json5` or `~/.config/gistpress/config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gistpress_config::Config;
    ///
    /// # fn example() -> gistpress_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Syncing {:?}", config.enabled_post_types);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// Empty credentials are allowed here since they can still be supplied
    /// through the environment. Values that are present must pass their
    /// [`settings`] validators.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;

        if !self.github.username.is_empty() {
            settings::validate_field(GITHUB_USERNAME, &self.github.username)?;
        }
        if let Some(token) = &self.github.access_token {
            settings::validate_field(GITHUB_ACCESS_TOKEN, token)?;
        }
        for post_type in &self.enabled_post_types {
            settings::validate_field(ENABLED_POST_TYPES, post_type)?;
        }

        Ok(())
    }

    /// Returns whether posts of the given type are synced.
    ///
    /// # Examples
    ///
    /// ```
    /// use gistpress_config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.syncs_post_type("post"));
    /// assert!(!config.syncs_post_type("page"));
    /// ```
    #[must_use]
    pub fn syncs_post_type(&self, post_type: &str) -> bool {
        self.enabled_post_types.iter().any(|t| t == post_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.github.username.is_empty());
        assert!(config.github.access_token.is_none());
        assert_eq!(config.enabled_post_types, vec!["post".to_string()]);
        assert!(config.data_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn new_config() {
        assert_eq!(Config::new(), Config::default());
    }

    #[test]
    fn syncs_post_type() {
        let config = Config {
            enabled_post_types: vec!["post".into(), "page".into()],
            ..Default::default()
        };
        assert!(config.syncs_post_type("page"));
        assert!(!config.syncs_post_type("revision"));
    }

    #[test]
    fn validate_rejects_bad_username() {
        let config = Config {
            github: GitHubSettings::new("octo-cat", "ghp_xxx"),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting {
                key: GITHUB_USERNAME,
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_attachment_post_type() {
        let config = Config {
            enabled_post_types: vec!["attachment".into()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidApiSettings { .. })
        ));
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn access_token_not_serialized_when_none() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("access_token"));
        assert!(!json.contains("data_dir"));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gistpress.json5");
        std::fs::write(
            &path,
            r#"
            {
                // account used for every gist
                github: { username: "octocat", access_token: "ghp_test" },
                api: { timeout_secs: 10 },
                enabled_post_types: ["post", "page"],
                data_dir: "/var/lib/gistpress",
            }
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.github.access_token.as_deref(), Some("ghp_test"));
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.base_url, "https://api.github.com");
        assert_eq!(config.enabled_post_types, vec!["post", "page"]);
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/gistpress")));
    }

    #[test]
    fn load_from_file_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gistpress.json");
        std::fs::write(&path, r#"{"github": {"access_token": "not a token"}}"#).unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let original = Config {
            github: GitHubSettings::new("octocat", "ghp_xxx"),
            enabled_post_types: vec!["page".into()],
            ..Default::default()
        };

        original.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), original);
    }
}
