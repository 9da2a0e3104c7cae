//! Shared protocol types for the gistpress application.
//!
//! This crate defines the core types used across all gistpress components:
//! the post record supplied by the blog engine, the trimmed gist metadata
//! stored with each post, and the per-post sync state.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`post`]: Post identifiers, statuses, and the `Post` record
//! - [`gist`]: Gist metadata filtering and the `GistMeta` type
//! - [`state`]: The persisted `SyncState` of a post
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Recording the outcome of a sync attempt:
//!
//! ```
//! use gistpress_protocol::{GistMeta, SyncState};
//! use serde_json::json;
//!
//! let mut state = SyncState::default();
//! state.record_failure("Bad credentials");
//!
//! let gist = json!({"id": "abc", "files": {}});
//! let meta = GistMeta::from_gist(gist.as_object().unwrap().clone()).unwrap();
//! state.record_success(meta);
//!
//! assert!(state.last_error.is_none());
//! assert_eq!(state.gist_meta.unwrap().id(), "abc");
//! ```

pub mod error;
pub mod gist;
pub mod post;
pub mod state;

// Re-export primary types at crate root for convenience
pub use error::{ProtocolError, Result};
pub use gist::{EXCLUDED_GIST_FIELDS, GistMeta, gist_id};
pub use post::{Post, PostId, PostKind, PostStatus};
pub use state::{FALLBACK_ERROR_MESSAGE, SyncState, failure_message};
