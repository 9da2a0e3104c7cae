//! Per-post synchronization state.
//!
//! Each post carries two independent slots: the metadata of the last gist
//! it was successfully mirrored to, and the message of the most recent
//! failed attempt. Both may be set at once: a stale success plus a newer
//! error.

use serde::{Deserialize, Serialize};

use crate::gist::GistMeta;

/// Message stored when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unexpected response";

/// The persisted sync state of one post.
///
/// # Examples
///
/// ```
/// use gistpress_protocol::SyncState;
///
/// let mut state = SyncState::default();
/// assert!(!state.has_gist());
///
/// state.record_failure("Bad credentials");
/// assert_eq!(state.last_error.as_deref(), Some("Bad credentials"));
/// assert!(!state.has_gist());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    /// Metadata of the last successfully synced gist.
    #[serde(rename = "gist_meta", default, skip_serializing_if = "Option::is_none")]
    pub gist_meta: Option<GistMeta>,
    /// Message of the most recent failed attempt.
    #[serde(
        rename = "gist_meta_error",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_error: Option<String>,
}

impl SyncState {
    /// Returns `true` if the post has been mirrored at least once.
    #[must_use]
    pub fn has_gist(&self) -> bool {
        self.gist_meta.is_some()
    }

    /// Replaces the stored metadata and clears any previous error.
    pub fn record_success(&mut self, meta: GistMeta) {
        self.gist_meta = Some(meta);
        self.last_error = None;
    }

    /// Stores a failure message, leaving the previous metadata untouched.
    ///
    /// An empty message is replaced with [`FALLBACK_ERROR_MESSAGE`].
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.last_error = Some(failure_message(message));
    }
}

/// Normalizes a failure message, substituting the fallback for empty ones.
///
/// # Examples
///
/// ```
/// use gistpress_protocol::{FALLBACK_ERROR_MESSAGE, failure_message};
///
/// assert_eq!(failure_message("Not Found"), "Not Found");
/// assert_eq!(failure_message(""), FALLBACK_ERROR_MESSAGE);
/// ```
#[must_use]
pub fn failure_message(message: impl Into<String>) -> String {
    let message = message.into();
    if message.is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(id: &str) -> GistMeta {
        GistMeta::from_gist(json!({"id": id}).as_object().cloned().unwrap()).unwrap()
    }

    #[test]
    fn success_clears_previous_error() {
        let mut state = SyncState {
            gist_meta: None,
            last_error: Some("Bad credentials".to_string()),
        };
        state.record_success(meta("abc"));
        assert_eq!(state.gist_meta.as_ref().map(GistMeta::id), Some("abc"));
        assert!(state.last_error.is_none());
    }

    #[test]
    fn success_overwrites_previous_meta() {
        let mut state = SyncState::default();
        state.record_success(meta("old"));
        state.record_success(meta("new"));
        assert_eq!(state.gist_meta.as_ref().map(GistMeta::id), Some("new"));
    }

    #[test]
    fn failure_keeps_previous_meta() {
        let mut state = SyncState::default();
        state.record_success(meta("abc"));
        state.record_failure("Not Found");
        assert_eq!(state.gist_meta.as_ref().map(GistMeta::id), Some("abc"));
        assert_eq!(state.last_error.as_deref(), Some("Not Found"));
    }

    #[test]
    fn empty_failure_uses_fallback() {
        let mut state = SyncState::default();
        state.record_failure("");
        assert_eq!(state.last_error.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
    }

    #[test]
    fn serializes_with_metadata_slot_names() {
        let mut state = SyncState::default();
        state.record_success(meta("abc"));
        state.record_failure("boom");
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({"gist_meta": {"id": "abc"}, "gist_meta_error": "boom"})
        );

        let empty: SyncState = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, SyncState::default());
    }
}
