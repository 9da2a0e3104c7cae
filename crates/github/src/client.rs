//! GitHub API client implementation.
//!
//! This module provides the [`GitHubClient`] struct and the request/response
//! contract shared by every gist endpoint:
//!
//! - Credentials travel with every request as the `access_token` query
//!   parameter; GitHub alone decides whether they are valid.
//! - The body is decoded as JSON before the status is looked at. An empty
//!   or malformed body is a [`Error::Decode`] whatever the status.
//! - GET requests succeed on `200` only; POST requests on `200` or `201`.
//! - Failures are never retried.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};

/// Base URL of the public GitHub REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `User-Agent` header sent with every request; GitHub rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("gistpress/", env!("CARGO_PKG_VERSION"));

/// Status codes accepted as success for GET requests.
const GET_SUCCESS: &[StatusCode] = &[StatusCode::OK];

/// Status codes accepted as success for POST requests.
const POST_SUCCESS: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];

/// Options used to construct a [`GitHubClient`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gistpress_github::ClientOptions;
///
/// let options = ClientOptions::default()
///     .with_base_url("https://github.example.com/api/v3/")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(options.base_url, "https://github.example.com/api/v3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// The API base URL, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to each request.
    pub timeout: Duration,
    /// The `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientOptions {
    /// Sets the API base URL. Trailing slashes are removed.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// GitHub API client for the gist endpoints.
///
/// The client holds no credentials; each call takes the access token to
/// use. Tokens are passed as [`SecretString`] so they never show up in
/// debug output or logs.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use gistpress_github::{ClientOptions, GitHubClient};
///
/// # async fn example() -> gistpress_github::Result<()> {
/// let client = GitHubClient::new(ClientOptions::default())?;
/// let token = SecretString::from("ghp_your_token".to_string());
///
/// let user = client.get_user("octocat", &token).await?;
/// println!("Gists will be created under {}", user.login);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: reqwest::Client,
    /// The API base URL, without a trailing slash.
    base_url: String,
}

impl GitHubClient {
    /// Creates a new GitHub client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Build`] if the HTTP client fails to initialize.
    #[instrument(skip(options), fields(base_url = %options.base_url))]
    pub fn new(options: ClientOptions) -> Result<Self> {
        debug!(timeout_secs = options.timeout.as_secs(), "creating GitHub client");
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()
            .map_err(Error::Build)?;

        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the API base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues an authenticated GET request and returns the decoded body.
    pub(crate) async fn get(&self, path: &str, access_token: &SecretString) -> Result<Value> {
        self.send(Method::GET, path, access_token, None::<&()>)
            .await
    }

    /// Issues an authenticated POST request with a JSON body.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        access_token: &SecretString,
        body: &B,
    ) -> Result<Value> {
        self.send(Method::POST, path, access_token, Some(body)).await
    }

    #[instrument(skip(self, access_token, body), fields(method = %method, path = %path))]
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        access_token: &SecretString,
        body: Option<&B>,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self
            .http
            .request(method.clone(), &url)
            .query(&[("access_token", access_token.expose_secret())]);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let error = Error::transport(e);
            warn!(error = %error, "request failed");
            error
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(Error::transport)?;
        debug!(status = status.as_u16(), len = bytes.len(), "received response");

        let success = if method == Method::POST {
            POST_SUCCESS
        } else {
            GET_SUCCESS
        };
        interpret_response(status, &bytes, success, method == Method::POST)
    }
}

/// Turns a raw response into the decoded body or a classified error.
///
/// `with_details` enables the validation detail suffix built from the
/// `errors` array GitHub attaches to failed writes.
pub(crate) fn interpret_response(
    status: StatusCode,
    body: &[u8],
    success: &[StatusCode],
    with_details: bool,
) -> Result<Value> {
    let data = match serde_json::from_slice::<Value>(body) {
        Ok(data) if !is_blank(&data) => data,
        _ => {
            warn!(status = status.as_u16(), "response body is not usable JSON");
            return Err(Error::Decode {
                status: status.as_u16(),
            });
        }
    };

    if success.contains(&status) {
        return Ok(data);
    }

    let message = match data.get("message").filter(|m| !m.is_null()) {
        Some(message) => {
            let mut message = scalar_to_string(message);
            let details = data.get("errors").and_then(Value::as_array);
            if let Some(details) = details.filter(|_| with_details) {
                let details: Vec<String> = details.iter().map(describe_validation_error).collect();
                message.push_str(&format!(". Error details: {}.", details.join(", ")));
            }
            message
        }
        None => format!("Client error with status code {}", status.as_u16()),
    };

    warn!(status = status.as_u16(), %message, "GitHub API error");
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

/// Returns `true` for decoded bodies that carry no data at all.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Formats one entry of an `errors` array as `resource.field code`.
fn describe_validation_error(error: &Value) -> String {
    let part = |key: &str| error.get(key).map(scalar_to_string).unwrap_or_default();
    format!("{}.{} {}", part("resource"), part("field"), part("code"))
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
