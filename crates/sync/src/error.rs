//! Error types for the synchronizer.
//!
//! GitHub failures are not errors at this level: they are recorded with the
//! post and reported as [`SyncOutcome::Failed`](crate::SyncOutcome::Failed).
//! [`SyncError`] covers what remains: the local post store and the post
//! snapshot.

use std::path::PathBuf;

use gistpress_protocol::PostId;

/// Errors that can occur while synchronizing a post.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// An I/O error occurred in the post store.
    #[error("I/O error in post store: {0}")]
    Io(#[from] std::io::Error),

    /// A stored sync state could not be parsed.
    #[error("corrupt sync state at {path}: {source}")]
    CorruptState {
        /// The file holding the state.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A sync state could not be serialized.
    #[error("failed to serialize sync state: {0}")]
    SerializeState(#[source] serde_json::Error),

    /// The post record could not be serialized for upload.
    #[error("failed to serialize post {post}: {source}")]
    Snapshot {
        /// The post being synced.
        post: PostId,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The data directory could not be determined.
    #[error("could not determine data directory")]
    NoDataDirectory,
}

/// A specialized Result type for synchronizer operations.
pub type Result<T> = std::result::Result<T, SyncError>;
