//! Configuration file reading and writing.
//!
//! Files may be JSON5 (comments, trailing commas) or plain JSON; the JSON5
//! parser reads both. Files are always written back as pretty JSON.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./gistpress.json5` or `./gistpress.json`
//! 2. User: `~/.config/gistpress/config.json5` or `~/.config/gistpress/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local configuration file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["gistpress.json5", "gistpress.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "gistpress";

/// User configuration file names, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Lists every path a configuration file may live at, highest priority first.
///
/// `config_dir` is the platform configuration directory, if any.
#[must_use]
pub fn candidate_paths(config_dir: Option<&Path>) -> Vec<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(PathBuf::from);
    let user = config_dir.into_iter().flat_map(|dir| {
        USER_FILE_NAMES
            .iter()
            .map(move |name| dir.join(USER_CONFIG_DIR).join(name))
    });
    local.chain(user).collect()
}

/// Finds the first existing configuration file.
///
/// # Examples
///
/// ```no_run
/// use gistpress_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    candidate_paths(dirs::config_dir().as_deref())
        .into_iter()
        .find(|path| path.exists())
}

/// Returns the default user configuration file path.
///
/// This is typically `~/.config/gistpress/config.json5`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR).join(USER_FILE_NAMES[0]))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration to a file as pretty JSON, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if the directories or file cannot be written or the
/// value cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        username: String,
        timeout_secs: u64,
    }

    #[test]
    fn candidates_prefer_local_files() {
        let paths = candidate_paths(Some(Path::new("/home/me/.config")));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("gistpress.json5"),
                PathBuf::from("gistpress.json"),
                PathBuf::from("/home/me/.config/gistpress/config.json5"),
                PathBuf::from("/home/me/.config/gistpress/config.json"),
            ]
        );
    }

    #[test]
    fn candidates_without_config_dir() {
        assert_eq!(candidate_paths(None).len(), 2);
    }

    #[test]
    fn read_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json5");
        std::fs::write(
            &path,
            r#"
            {
                // GitHub account
                username: "octocat",
                timeout_secs: 42,
            }
            "#,
        )
        .unwrap();

        let config: TestConfig = read_config_file(&path).unwrap();
        assert_eq!(config.username, "octocat");
        assert_eq!(config.timeout_secs, 42);
    }

    #[test]
    fn read_nonexistent_file() {
        let result: Result<TestConfig> = read_config_file("/nonexistent/path.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result: Result<TestConfig> = read_config_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseJson5(_))));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = TestConfig {
            username: "octocat".to_string(),
            timeout_secs: 42,
        };

        write_config_file(&path, &config).unwrap();
        let loaded: TestConfig = read_config_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
