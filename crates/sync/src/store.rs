//! Persistence of per-post sync state.
//!
//! The synchronizer reads and writes the [`SyncState`] of a post through the
//! [`PostStore`] trait. Two stores are provided:
//!
//! - [`MemoryStore`]: in-process, for tests and embedding
//! - [`FileStore`]: one JSON file per post in the XDG data directory
//!
//! # Directory Structure
//!
//! ```text
//! ~/.local/share/gistpress/       # Linux
//! ~/Library/Application Support/gistpress/  # macOS
//! └── posts/
//!     └── post-{id}.json
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use gistpress_protocol::{PostId, SyncState};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{Result, SyncError};

/// Storage for the sync state of posts.
///
/// Writes are last-write-wins; stores offer no locking across concurrent
/// saves of the same post.
pub trait PostStore {
    /// Loads the sync state of a post. Never-synced posts yield the default state.
    ///
    /// # Errors
    ///
    /// Returns an error if stored state exists but cannot be read.
    fn load_state(&self, post: PostId) -> Result<SyncState>;

    /// Replaces the sync state of a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save_state(&self, post: PostId, state: &SyncState) -> Result<()>;
}

impl<S: PostStore + ?Sized> PostStore for &S {
    fn load_state(&self, post: PostId) -> Result<SyncState> {
        (**self).load_state(post)
    }

    fn save_state(&self, post: PostId, state: &SyncState) -> Result<()> {
        (**self).save_state(post, state)
    }
}

/// An in-memory [`PostStore`].
///
/// # Examples
///
/// ```
/// use gistpress_protocol::{PostId, SyncState};
/// use gistpress_sync::{MemoryStore, PostStore};
///
/// let store = MemoryStore::new();
/// let mut state = SyncState::default();
/// state.record_failure("Bad credentials");
///
/// store.save_state(PostId::new(1), &state).unwrap();
/// assert_eq!(store.load_state(PostId::new(1)).unwrap(), state);
/// assert_eq!(store.load_state(PostId::new(2)).unwrap(), SyncState::default());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: Mutex<HashMap<PostId, SyncState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one post's state.
    #[must_use]
    pub fn with_state(post: PostId, state: SyncState) -> Self {
        let store = Self::new();
        store
            .states
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(post, state);
        store
    }
}

impl PostStore for MemoryStore {
    fn load_state(&self, post: PostId) -> Result<SyncState> {
        let states = self
            .states
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(states.get(&post).cloned().unwrap_or_default())
    }

    fn save_state(&self, post: PostId, state: &SyncState) -> Result<()> {
        self.states
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(post, state.clone());
        Ok(())
    }
}

/// Sync state as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredState {
    #[serde(flatten)]
    state: SyncState,
    /// When the state was last written.
    updated_at: DateTime<Utc>,
}

/// A [`PostStore`] keeping one JSON file per post.
///
/// # Examples
///
/// ```no_run
/// use gistpress_protocol::PostId;
/// use gistpress_sync::{FileStore, PostStore};
///
/// # fn example() -> gistpress_sync::Result<()> {
/// let store = FileStore::new()?;
/// let state = store.load_state(PostId::new(42))?;
/// println!("synced before: {}", state.has_gist());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a store in the XDG data directory.
    ///
    /// - Linux: `~/.local/share/gistpress/posts/`
    /// - macOS: `~/Library/Application Support/gistpress/posts/`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\gistpress\posts\`
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined or the
    /// directory structure cannot be created.
    #[instrument]
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or(SyncError::NoDataDirectory)?;
        Self::with_path(data_dir.join("gistpress").join("posts"))
    }

    /// Creates a store at a custom path, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument]
    pub fn with_path(base_path: PathBuf) -> Result<Self> {
        debug!(?base_path, "creating post store");

        if !base_path.exists() {
            debug!(?base_path, "creating store directory");
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self { base_path })
    }

    /// Returns the directory holding the state files.
    #[must_use]
    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }

    /// Returns when a post's state was last written, if it ever was.
    ///
    /// # Errors
    ///
    /// Returns an error if stored state exists but cannot be read.
    pub fn updated_at(&self, post: PostId) -> Result<Option<DateTime<Utc>>> {
        Ok(self.read(post)?.map(|stored| stored.updated_at))
    }

    fn read(&self, post: PostId) -> Result<Option<StoredState>> {
        let path = self.state_path(post);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let stored = serde_json::from_str(&content).map_err(|source| {
                    warn!(?path, error = %source, "failed to parse state file");
                    SyncError::CorruptState {
                        path: path.clone(),
                        source,
                    }
                })?;
                Ok(Some(stored))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "state file not found");
                Ok(None)
            }
            Err(e) => {
                warn!(?path, error = %e, "failed to read state file");
                Err(SyncError::Io(e))
            }
        }
    }

    fn state_path(&self, post: PostId) -> PathBuf {
        self.base_path.join(format!("post-{post}.json"))
    }
}

impl PostStore for FileStore {
    #[instrument(skip(self), fields(post = %post))]
    fn load_state(&self, post: PostId) -> Result<SyncState> {
        Ok(self
            .read(post)?
            .map(|stored| stored.state)
            .unwrap_or_default())
    }

    #[instrument(skip(self, state), fields(post = %post))]
    fn save_state(&self, post: PostId, state: &SyncState) -> Result<()> {
        let path = self.state_path(post);
        let stored = StoredState {
            state: state.clone(),
            updated_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&stored).map_err(SyncError::SerializeState)?;

        fs::write(&path, content)?;
        debug!(?path, "state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gistpress_protocol::GistMeta;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store =
            FileStore::with_path(temp_dir.path().to_path_buf()).expect("Failed to create store");
        (store, temp_dir)
    }

    fn meta(id: &str) -> GistMeta {
        GistMeta::from_gist(
            json!({"id": id, "html_url": format!("https://gist.github.com/{id}")})
                .as_object()
                .cloned()
                .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn load_returns_default_for_missing_post() {
        let (store, _temp) = create_test_store();
        let state = store.load_state(PostId::new(1)).expect("load");
        assert_eq!(state, SyncState::default());
        assert!(store.updated_at(PostId::new(1)).unwrap().is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _temp) = create_test_store();
        let mut state = SyncState::default();
        state.record_success(meta("abc"));
        state.record_failure("Not Found");

        store.save_state(PostId::new(7), &state).expect("save");
        let loaded = store.load_state(PostId::new(7)).expect("load");

        assert_eq!(loaded, state);
        assert!(store.updated_at(PostId::new(7)).unwrap().is_some());
    }

    #[test]
    fn file_uses_metadata_slot_names() {
        let (store, temp) = create_test_store();
        let mut state = SyncState::default();
        state.record_success(meta("abc"));
        store.save_state(PostId::new(7), &state).expect("save");

        let raw = fs::read_to_string(temp.path().join("post-7.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["gist_meta"]["id"], json!("abc"));
        assert!(value.get("gist_meta_error").is_none());
        assert!(value.get("updated_at").is_some());
    }

    #[test]
    fn cleared_error_is_removed_from_disk() {
        let (store, _temp) = create_test_store();
        let mut state = SyncState::default();
        state.record_failure("boom");
        store.save_state(PostId::new(1), &state).unwrap();

        state.record_success(meta("abc"));
        store.save_state(PostId::new(1), &state).unwrap();

        assert!(store.load_state(PostId::new(1)).unwrap().last_error.is_none());
    }

    #[test]
    fn posts_are_isolated() {
        let (store, _temp) = create_test_store();
        let mut first = SyncState::default();
        first.record_success(meta("one"));
        let mut second = SyncState::default();
        second.record_success(meta("two"));

        store.save_state(PostId::new(1), &first).unwrap();
        store.save_state(PostId::new(2), &second).unwrap();

        assert_eq!(store.load_state(PostId::new(1)).unwrap(), first);
        assert_eq!(store.load_state(PostId::new(2)).unwrap(), second);
    }

    #[test]
    fn load_returns_error_for_invalid_json() {
        let (store, temp) = create_test_store();
        fs::write(temp.path().join("post-3.json"), "not valid json").unwrap();

        let err = store.load_state(PostId::new(3)).unwrap_err();
        assert!(matches!(err, SyncError::CorruptState { .. }));
    }

    #[test]
    fn with_path_creates_directory() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("posts");
        assert!(!path.exists());

        let store = FileStore::with_path(path.clone()).expect("create store");
        assert!(path.exists());
        assert_eq!(store.base_path(), path.as_path());
    }

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.load_state(PostId::new(1)).unwrap(), SyncState::default());
    }

    #[test]
    fn memory_store_with_state() {
        let mut state = SyncState::default();
        state.record_success(meta("abc"));
        let store = MemoryStore::with_state(PostId::new(4), state.clone());
        assert_eq!(store.load_state(PostId::new(4)).unwrap(), state);
    }
}
