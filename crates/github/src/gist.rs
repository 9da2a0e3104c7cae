//! Gist endpoints of the GitHub API.
//!
//! This module extends [`GitHubClient`] with the three gist operations used
//! to mirror posts:
//!
//! - [`GitHubClient::get_gist`]: `GET /gists/{id}`
//! - [`GitHubClient::create_gist`]: `POST /gists`
//! - [`GitHubClient::edit_gist`]: `POST /gists/{id}`
//!
//! Edits are sent as POST rather than PATCH; GitHub accepts both for this
//! endpoint and answers with either `200` or `201`.

use std::collections::BTreeMap;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::GitHubClient;
use crate::error::{Error, Result};

/// A gist as returned by the API: an arbitrary JSON object.
pub type GistResult = Map<String, Value>;

/// A single file of a gist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistFile {
    /// The file's text content.
    pub content: String,
}

impl GistFile {
    /// Creates a file with the given content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Request body for creating or editing a gist.
///
/// Files are kept sorted by name so the serialized body is deterministic.
///
/// # Examples
///
/// ```
/// use gistpress_github::GistRequest;
///
/// let request = GistRequest::new("My post", true)
///     .with_file("post-1.txt", "Hello, world");
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["public"], true);
/// assert_eq!(body["files"]["post-1.txt"]["content"], "Hello, world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistRequest {
    /// The gist description.
    pub description: String,
    /// Whether the gist is public.
    #[serde(rename = "public")]
    pub is_public: bool,
    /// Files keyed by file name.
    pub files: BTreeMap<String, GistFile>,
}

impl GistRequest {
    /// Creates a request without files.
    #[must_use]
    pub fn new(description: impl Into<String>, is_public: bool) -> Self {
        Self {
            description: description.into(),
            is_public,
            files: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a file.
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(name.into(), GistFile::new(content));
        self
    }
}

/// Builds the API path of a single gist.
fn gist_path(id: &str) -> String {
    format!("gists/{}", utf8_percent_encode(id, NON_ALPHANUMERIC))
}

/// Unwraps a decoded body that must be a JSON object.
pub(crate) fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::UnexpectedResponse(
            "Unexpected response format (expected a JSON object)".to_string(),
        )),
    }
}

impl GitHubClient {
    /// Fetches a single gist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not usable JSON,
    /// or GitHub answers with any status other than `200`.
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
    /// let gist = client.get_gist("aa5a315d61ae9438b18d", &token).await?;
    /// println!("{:?}", gist.get("html_url"));
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, access_token))]
    pub async fn get_gist(&self, id: &str, access_token: &SecretString) -> Result<GistResult> {
        debug!("fetching gist");
        into_object(self.get(&gist_path(id), access_token).await?)
    }

    /// Creates a new gist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not usable JSON,
    /// or GitHub answers with a status other than `200` or `201`. Validation
    /// failures carry GitHub's per-field details in the message.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use secrecy::SecretString;
    /// use gistpress_github::{ClientOptions, GistRequest, GitHubClient};
    ///
    /// # async fn example() -> gistpress_github::Result<()> {
    /// let client = GitHubClient::new(ClientOptions::default())?;
    /// let token = SecretString::from("ghp_xxx".to_string());
    ///
    /// let request = GistRequest::new("Hello", false).with_file("post-1.txt", "Hi");
    /// let gist = client.create_gist(&token, &request).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, access_token, request), fields(files = request.files.len()))]
    pub async fn create_gist(
        &self,
        access_token: &SecretString,
        request: &GistRequest,
    ) -> Result<GistResult> {
        debug!("creating gist");
        into_object(self.post("gists", access_token, request).await?)
    }

    /// Replaces the description, visibility and files of an existing gist.
    ///
    /// # Errors
    ///
    /// Same as [`create_gist`](Self::create_gist).
    #[instrument(skip(self, access_token, request), fields(files = request.files.len()))]
    pub async fn edit_gist(
        &self,
        id: &str,
        access_token: &SecretString,
        request: &GistRequest,
    ) -> Result<GistResult> {
        debug!("editing gist");
        into_object(self.post(&gist_path(id), access_token, request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_public_flag_and_files() {
        let request = GistRequest::new("Title", false)
            .with_file("post-1.txt", "body")
            .with_file("post-1.json", "{}");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "description": "Title",
                "public": false,
                "files": {
                    "post-1.json": {"content": "{}"},
                    "post-1.txt": {"content": "body"}
                }
            })
        );
    }

    #[test]
    fn request_file_names_are_unique() {
        let request = GistRequest::new("t", true)
            .with_file("a.txt", "first")
            .with_file("a.txt", "second");
        assert_eq!(request.files.len(), 1);
        assert_eq!(request.files["a.txt"].content, "second");
    }

    #[test]
    fn request_serialization_is_deterministic() {
        let a = GistRequest::new("t", true)
            .with_file("b.txt", "b")
            .with_file("a.txt", "a");
        let b = GistRequest::new("t", true)
            .with_file("a.txt", "a")
            .with_file("b.txt", "b");
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn gist_path_encodes_id() {
        assert_eq!(gist_path("abc123"), "gists/abc123");
        assert_eq!(gist_path("../user"), "gists/%2E%2E%2Fuser");
    }

    #[test]
    fn into_object_rejects_non_objects() {
        assert!(into_object(json!({"id": "a"})).is_ok());
        assert!(matches!(
            into_object(json!([1, 2])),
            Err(Error::UnexpectedResponse(_))
        ));
    }
}
