//! GitHub Gist API client for gistpress.
//!
//! This crate wraps the four GitHub REST endpoints gistpress needs and
//! normalizes their responses into a single result-or-error contract.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`GitHubClient`] and [`ClientOptions`]: The HTTP client and its settings
//! - [`GistRequest`] and [`GistFile`]: Bodies for creating and editing gists
//! - [`UserInfo`]: The account behind an access token
//! - [`GistApi`]: The gist operations as a trait, for dependency injection
//! - [`Error`]: The failure classes of a gist request
//!
//! # Endpoints
//!
//! | Operation | Method | Path | Success |
//! |---|---|---|---|
//! | [`get_user`](GitHubClient::get_user) | GET | `/user` | 200 |
//! | [`get_gist`](GitHubClient::get_gist) | GET | `/gists/{id}` | 200 |
//! | [`create_gist`](GitHubClient::create_gist) | POST | `/gists` | 200, 201 |
//! | [`edit_gist`](GitHubClient::edit_gist) | POST | `/gists/{id}` | 200, 201 |
//!
//! Every request carries the access token as the `access_token` query
//! parameter. Tokens are handled as [`secrecy::SecretString`] and are
//! stripped from transport error messages.
//!
//! # Examples
//!
//! Creating a gist and reading it back:
//!
//! ```no_run
//! use secrecy::SecretString;
//! use gistpress_github::{ClientOptions, GistRequest, GitHubClient};
//!
//! # async fn example() -> gistpress_github::Result<()> {
//! let client = GitHubClient::new(ClientOptions::default())?;
//! let token = SecretString::from("ghp_your_token_here".to_string());
//!
//! let request = GistRequest::new("Hello", true).with_file("post-1.txt", "Hello, world");
//! let created = client.create_gist(&token, &request).await?;
//!
//! if let Some(id) = created.get("id").and_then(|id| id.as_str()) {
//!     let gist = client.get_gist(id, &token).await?;
//!     println!("{:?}", gist.get("html_url"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod gist;
pub mod user;

pub use api::GistApi;
pub use client::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, GitHubClient};
pub use error::{Error, JSON_PARSE_ERROR, Result};
pub use gist::{GistFile, GistRequest, GistResult};
pub use user::UserInfo;
