//! Human-readable sync status of a post.

use std::fmt;

use gistpress_protocol::{PostId, SyncState};

/// The stored sync state of one post, ready for display.
///
/// # Examples
///
/// ```
/// use gistpress_protocol::{PostId, SyncState};
/// use gistpress_sync::SyncStatus;
///
/// let status = SyncStatus::new(PostId::new(3), SyncState::default());
/// assert_eq!(status.to_string(), "Post 3: gist is not created yet.");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SyncStatus {
    /// The post.
    pub post: PostId,
    /// Its stored state.
    pub state: SyncState,
}

impl SyncStatus {
    /// Wraps a post's state.
    #[must_use]
    pub fn new(post: PostId, state: SyncState) -> Self {
        Self { post, state }
    }

    /// Returns the URL of the mirrored gist, if known.
    #[must_use]
    pub fn gist_url(&self) -> Option<&str> {
        self.state.gist_meta.as_ref().and_then(|meta| meta.html_url())
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state.gist_meta {
            None => write!(f, "Post {}: gist is not created yet.", self.post)?,
            Some(meta) => write!(
                f,
                "Post {}: saved into gist {} ({})",
                self.post,
                meta.id(),
                meta.html_url().unwrap_or("#")
            )?,
        }
        if let Some(error) = &self.state.last_error {
            write!(f, "\nLast sync failed: {error}")?;
        }
        Ok(())
    }
}
