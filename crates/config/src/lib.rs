//! Configuration management for gistpress.
//!
//! This crate handles loading, validating, and persisting configuration,
//! and resolving the GitHub credentials used for gist requests.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`api`]: API endpoint and timeout settings
//! - [`settings`]: Declarative field validators and sanitizing
//! - [`auth`]: GitHub username and token resolution
//! - [`persistence`]: Config file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Local config (`./gistpress.json5` or `./gistpress.json`)
//! 2. User config (`~/.config/gistpress/config.json5` or `~/.config/gistpress/config.json`)
//! 3. Built-in defaults
//!
//! Credentials may additionally come from `GISTPRESS_GITHUB_USERNAME`,
//! `GISTPRESS_GITHUB_TOKEN` and the GitHub CLI.
//!
//! # Example
//!
//! ```json5
//! {
//!   github: { username: "octocat", access_token: "ghp_xxx" },
//!   api: { base_url: "https://api.github.com", timeout_secs: 30 },
//!   enabled_post_types: ["post", "page"],
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod persistence;
pub mod settings;

pub use api::ApiSettings;
pub use auth::ResolvedCredentials;
pub use config::{Config, GitHubSettings};
pub use error::{ConfigError, Result};
