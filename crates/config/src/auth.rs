//! GitHub credential resolution.
//!
//! The access token is resolved with a fallback chain:
//!
//! 1. `github.access_token` from config
//! 2. The `GISTPRESS_GITHUB_TOKEN` environment variable
//! 3. `gh auth token` command (GitHub CLI)
//!
//! The username comes from `github.username`, falling back to the
//! `GISTPRESS_GITHUB_USERNAME` environment variable.

use crate::config::GitHubSettings;
use crate::error::{ConfigError, Result};
use crate::settings::{is_valid_access_token, is_valid_username};

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "GISTPRESS_GITHUB_TOKEN";

/// Environment variable holding the username.
pub const USERNAME_ENV: &str = "GISTPRESS_GITHUB_USERNAME";

/// A resolved username and token pair.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    /// The GitHub username.
    pub username: String,
    /// The access token.
    pub access_token: String,
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("username", &self.username)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Picks the username from config or the given environment value.
#[must_use]
pub fn username_from(settings: &GitHubSettings, env_value: Option<String>) -> Option<String> {
    non_empty(Some(settings.username.clone())).or_else(|| non_empty(env_value))
}

/// Picks the token from config or the given environment value.
#[must_use]
pub fn token_from(settings: &GitHubSettings, env_value: Option<String>) -> Option<String> {
    non_empty(settings.access_token.clone()).or_else(|| non_empty(env_value))
}

/// Resolves the GitHub username.
#[must_use]
pub fn resolve_username(settings: &GitHubSettings) -> Option<String> {
    username_from(settings, std::env::var(USERNAME_ENV).ok())
}

/// Resolves the GitHub access token.
///
/// Falls back to `gh auth token` when neither config nor environment
/// provides one. A failing `gh` is treated as "no token".
///
/// # Examples
///
/// ```no_run
/// use gistpress_config::{auth::resolve_token, GitHubSettings};
///
/// # async fn example() {
/// let settings = GitHubSettings::new("octocat", "ghp_xxx");
/// assert_eq!(resolve_token(&settings).await.as_deref(), Some("ghp_xxx"));
/// # }
/// ```
pub async fn resolve_token(settings: &GitHubSettings) -> Option<String> {
    if let Some(token) = token_from(settings, std::env::var(TOKEN_ENV).ok()) {
        return Some(token);
    }

    get_gh_token().await.ok().flatten()
}

/// Checks a username/token pair the way the access-token test does.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredentials`] if either value is absent and
/// [`ConfigError::InvalidCredentials`] if either fails its validator.
pub fn check_credentials(
    username: Option<String>,
    access_token: Option<String>,
) -> Result<ResolvedCredentials> {
    let (Some(username), Some(access_token)) = (non_empty(username), non_empty(access_token))
    else {
        return Err(ConfigError::MissingCredentials);
    };

    if !is_valid_username(&username) || !is_valid_access_token(&access_token) {
        return Err(ConfigError::InvalidCredentials);
    }

    Ok(ResolvedCredentials {
        username,
        access_token,
    })
}

/// Resolves and checks both credentials.
///
/// # Errors
///
/// See [`check_credentials`].
pub async fn resolve_credentials(settings: &GitHubSettings) -> Result<ResolvedCredentials> {
    check_credentials(resolve_username(settings), resolve_token(settings).await)
}

/// Gets a GitHub token from the `gh` CLI.
///
/// Runs `gh auth token` and returns the token if successful.
///
/// # Returns
///
/// - `Ok(Some(token))` if the command succeeds and returns a token
/// - `Ok(None)` if `gh` is not installed or not logged in
/// - `Err(...)` if the command exists but fails
///
/// # Errors
///
/// Returns an error if the `gh` command exists but cannot be run or exits
/// with an unexpected failure.
pub async fn get_gh_token() -> Result<Option<String>> {
    use tokio::process::Command;

    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::GhAuthFailed(e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if stderr.contains("not logged in") || stderr.contains("no oauth token") {
            return Ok(None);
        }
        return Err(ConfigError::GhAuthError {
            code: output.status.code(),
            stderr,
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(Some(token).filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_token_wins_over_env() {
        let settings = GitHubSettings::new("octocat", "from_config");
        assert_eq!(
            token_from(&settings, Some("from_env".into())).as_deref(),
            Some("from_config")
        );
    }

    #[test]
    fn env_token_used_when_config_blank() {
        let settings = GitHubSettings {
            username: String::new(),
            access_token: Some("   ".into()),
        };
        assert_eq!(
            token_from(&settings, Some("from_env".into())).as_deref(),
            Some("from_env")
        );
        assert_eq!(token_from(&settings, None), None);
    }

    #[test]
    fn username_falls_back_to_env() {
        let settings = GitHubSettings::default();
        assert_eq!(
            username_from(&settings, Some("octocat".into())).as_deref(),
            Some("octocat")
        );
    }

    #[test]
    fn check_credentials_missing() {
        assert!(matches!(
            check_credentials(Some("octocat".into()), None),
            Err(ConfigError::MissingCredentials)
        ));
        assert!(matches!(
            check_credentials(Some(String::new()), Some("ghp_x".into())),
            Err(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn check_credentials_invalid() {
        let err = check_credentials(Some("octo cat".into()), Some("ghp_x".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid GitHub username or access token value"
        );
    }

    #[test]
    fn check_credentials_ok() {
        let creds = check_credentials(Some("octocat".into()), Some("ghp_x".into())).unwrap();
        assert_eq!(creds.username, "octocat");
        assert_eq!(creds.access_token, "ghp_x");
        assert!(!format!("{creds:?}").contains("ghp_x"));
    }

    #[tokio::test]
    async fn resolve_token_prefers_config() {
        let settings = GitHubSettings::new("octocat", "ghp_config");
        assert_eq!(resolve_token(&settings).await.as_deref(), Some("ghp_config"));
    }

    #[tokio::test]
    async fn resolve_token_gh_cli_fallback_does_not_panic() {
        let _result = resolve_token(&GitHubSettings::default()).await;
    }
}
