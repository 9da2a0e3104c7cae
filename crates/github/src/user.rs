//! The authenticated-user endpoint.
//!
//! Used to check that stored credentials work before any post is mirrored,
//! and to show which account gists will be created under.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::GitHubClient;
use crate::error::{Error, Result};

/// The GitHub account behind an access token.
///
/// Fields not modelled here are kept in [`UserInfo::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The account login.
    #[serde(default)]
    pub login: String,
    /// The display name.
    #[serde(default)]
    pub name: Option<String>,
    /// The public e-mail address.
    #[serde(default)]
    pub email: Option<String>,
    /// Number of public repositories.
    #[serde(default)]
    pub public_repos: Option<u64>,
    /// Number of public gists.
    #[serde(default)]
    pub public_gists: Option<u64>,
    /// The profile URL.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Every other field of the response.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GitHubClient {
    /// Fetches the account the access token belongs to.
    ///
    /// The username is informational only: GitHub resolves the account from
    /// the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not usable JSON,
    /// GitHub answers with any status other than `200`, or the body is not
    /// a user object.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use secrecy::SecretString;
    /// use gistpress_github::{ClientOptions, GitHubClient};
    ///
    /// # async fn example() -> gistpress_github::Result<()> {
    /// let client = GitHubClient::new(ClientOptions::default())?;
    /// let token = SecretString::from("ghp_xxx".to_string());
    ///
    /// match client.get_user("octocat", &token).await {
    ///     Ok(user) => println!("Token belongs to {}", user.login),
    ///     Err(e) => println!("Token check failed: {e}"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, access_token))]
    pub async fn get_user(&self, username: &str, access_token: &SecretString) -> Result<UserInfo> {
        debug!("fetching authenticated user");
        let value = self.get("user", access_token).await?;
        let user: UserInfo = serde_json::from_value(value).map_err(|e| {
            Error::UnexpectedResponse(format!("Unexpected response format ({e})"))
        })?;
        debug!(login = %user.login, "fetched user");
        Ok(user)
    }
}
