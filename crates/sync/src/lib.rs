//! Post synchronizer for gistpress.
//!
//! This crate decides, for every saved post, whether to create or update a
//! gist, performs the write through a [`GistApi`](gistpress_github::GistApi)
//! implementation, and records the outcome with the post.
//!
//! # Overview
//!
//! - [`Synchronizer`]: The create-or-update routine
//! - [`SyncAction`], [`SyncTrigger`], [`SyncOutcome`]: Inputs and results of one attempt
//! - [`manifest`]: The gist files derived from a post
//! - [`PostStore`], [`MemoryStore`], [`FileStore`]: Where sync state lives
//! - [`SyncStatus`]: Display of a post's stored state
//!
//! # Examples
//!
//! ```no_run
//! use gistpress_github::{ClientOptions, GitHubClient};
//! use gistpress_protocol::{Post, PostStatus};
//! use gistpress_sync::{Credentials, MemoryStore, SyncOutcome, SyncTrigger, Synchronizer};
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = GitHubClient::new(ClientOptions::default())?;
//! let credentials = Credentials::new("octocat", SecretString::from("ghp_xxx".to_string()));
//! let synchronizer = Synchronizer::new(client, MemoryStore::new(), credentials);
//!
//! let post = Post::new(1, "Hello", "World").with_status(PostStatus::Publish);
//! match synchronizer.sync_post(&post, SyncTrigger::Save).await? {
//!     SyncOutcome::Synced(meta) => println!("mirrored to {:?}", meta.html_url()),
//!     SyncOutcome::Failed(message) => println!("sync failed: {message}"),
//!     SyncOutcome::Skipped(reason) => println!("skipped: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod manifest;
pub mod status;
pub mod store;
pub mod synchronizer;

pub use error::{Result, SyncError};
pub use status::SyncStatus;
pub use store::{FileStore, MemoryStore, PostStore};
pub use synchronizer::{
    Credentials, SkipReason, SyncAction, SyncOutcome, SyncTrigger, Synchronizer, canonical_post,
};
