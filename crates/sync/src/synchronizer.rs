//! The save-triggered create-or-update routine.
//!
//! One call to [`Synchronizer::sync_post`] is one best-effort attempt:
//!
//! 1. Skip autosaves, unresolved revisions, and posts without a title or
//!    content. Revisions are resolved to their parent record by the caller,
//!    see [`canonical_post`].
//! 2. Build the gist request from the post.
//! 3. Create a gist if the post has never been synced, otherwise edit the
//!    gist recorded for it.
//! 4. Re-fetch the gist by the id the write returned, to store the full
//!    representation rather than the possibly partial write response.
//! 5. Store the trimmed gist as the post's metadata and clear any previous
//!    error; on failure store the message and keep the previous metadata.
//!
//! GitHub failures never escape: they end up in the post's state and in
//! [`SyncOutcome::Failed`].

use std::fmt;

use gistpress_github::{Error as GitHubError, GistApi, GistRequest, UserInfo};
use gistpress_protocol::{GistMeta, Post, PostId, SyncState, failure_message, gist_id};
use secrecy::SecretString;
use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::manifest::gist_request_for;
use crate::status::SyncStatus;
use crate::store::PostStore;

/// GitHub credentials used for every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// The GitHub username gists are created under.
    pub username: String,
    /// The personal access token.
    pub access_token: SecretString,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, access_token: SecretString) -> Self {
        Self {
            username: username.into(),
            access_token,
        }
    }
}

/// What caused a sync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncTrigger {
    /// An explicit save by the author.
    #[default]
    Save,
    /// A periodic autosave by the editor; never synced.
    Autosave,
}

/// The write a sync attempt performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// The post has no gist yet.
    Create,
    /// The post is mirrored to the gist with this id.
    Edit(String),
}

impl SyncAction {
    /// Chooses the action for a post from its stored state.
    ///
    /// # Examples
    ///
    /// ```
    /// use gistpress_protocol::{GistMeta, SyncState};
    /// use gistpress_sync::SyncAction;
    /// use serde_json::json;
    ///
    /// assert_eq!(SyncAction::for_state(&SyncState::default()), SyncAction::Create);
    ///
    /// let mut state = SyncState::default();
    /// let meta = GistMeta::from_gist(json!({"id": "abc"}).as_object().unwrap().clone()).unwrap();
    /// state.record_success(meta);
    /// assert_eq!(SyncAction::for_state(&state), SyncAction::Edit("abc".to_string()));
    /// ```
    #[must_use]
    pub fn for_state(state: &SyncState) -> Self {
        match &state.gist_meta {
            Some(meta) => Self::Edit(meta.id().to_string()),
            None => Self::Create,
        }
    }
}

/// Why a post was not synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The save was an autosave.
    Autosave,
    /// The post has no title or no content.
    Incomplete,
    /// A revision was given without the record of the post it revises.
    UnresolvedRevision,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Autosave => f.write_str("autosave"),
            Self::Incomplete => f.write_str("post has no title or no content"),
            Self::UnresolvedRevision => f.write_str("revision without its parent post"),
        }
    }
}

/// Resolves the record a save event should mirror.
///
/// Saving a revision mirrors the post it revises: title, content, publish
/// state and snapshot all come from `parent`, which must be that post's
/// record. Any other record is returned unchanged and `parent` is ignored.
///
/// # Errors
///
/// Returns [`SkipReason::UnresolvedRevision`] for a revision whose parent
/// record is missing or does not match.
///
/// # Examples
///
/// ```
/// use gistpress_protocol::{Post, PostId, PostKind, PostStatus};
/// use gistpress_sync::canonical_post;
///
/// let parent = Post::new(10, "Hello", "World").with_status(PostStatus::Publish);
/// let revision = Post::new(12, "Hello", "World!")
///     .with_kind(PostKind::Revision)
///     .with_status(PostStatus::Inherit)
///     .with_parent(10);
///
/// let post = canonical_post(revision, Some(parent)).unwrap();
/// assert_eq!(post.id, PostId::new(10));
/// assert!(post.is_public());
/// ```
pub fn canonical_post(
    saved: Post,
    parent: Option<Post>,
) -> std::result::Result<Post, SkipReason> {
    let Some(parent_id) = saved.revision_of() else {
        return if saved.is_revision() {
            Err(SkipReason::UnresolvedRevision)
        } else {
            Ok(saved)
        };
    };

    match parent {
        Some(parent) if parent.id == parent_id && !parent.is_revision() => Ok(parent),
        _ => Err(SkipReason::UnresolvedRevision),
    }
}

/// The result of one sync attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Nothing was sent to GitHub and nothing was stored.
    Skipped(SkipReason),
    /// The gist was written and its metadata stored.
    Synced(GistMeta),
    /// The attempt failed; the message was stored with the post.
    Failed(String),
}

impl SyncOutcome {
    /// Returns `true` if the gist was written.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced(_))
    }
}

/// Mirrors posts into gists.
///
/// The synchronizer is built once with its collaborators and then invoked
/// for every saved post.
///
/// # Examples
///
/// ```no_run
/// use gistpress_github::{ClientOptions, GitHubClient};
/// use gistpress_protocol::Post;
/// use gistpress_sync::{Credentials, FileStore, SyncTrigger, Synchronizer};
/// use secrecy::SecretString;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = GitHubClient::new(ClientOptions::default())?;
/// let store = FileStore::new()?;
/// let credentials = Credentials::new("octocat", SecretString::from("ghp_xxx".to_string()));
/// let synchronizer = Synchronizer::new(client, store, credentials);
///
/// let post = Post::new(1, "Hello", "World");
/// let outcome = synchronizer.sync_post(&post, SyncTrigger::Save).await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Synchronizer<C, S> {
    client: C,
    store: S,
    credentials: Credentials,
}

impl<C: GistApi, S: PostStore> Synchronizer<C, S> {
    /// Creates a synchronizer.
    #[must_use]
    pub fn new(client: C, store: S, credentials: Credentials) -> Self {
        Self {
            client,
            store,
            credentials,
        }
    }

    /// Returns the gist client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the post store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the credentials in use.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Mirrors a saved post into its gist.
    ///
    /// Revisions must first be resolved with [`canonical_post`]; one passed
    /// directly is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the post store fails or the post cannot be
    /// serialized. GitHub failures are reported as [`SyncOutcome::Failed`].
    #[instrument(skip(self, post), fields(post = %post.id))]
    pub async fn sync_post(&self, post: &Post, trigger: SyncTrigger) -> Result<SyncOutcome> {
        if trigger == SyncTrigger::Autosave {
            debug!("skipping autosave");
            return Ok(SyncOutcome::Skipped(SkipReason::Autosave));
        }
        if post.is_revision() {
            debug!("skipping revision that was not resolved to its parent");
            return Ok(SyncOutcome::Skipped(SkipReason::UnresolvedRevision));
        }
        if !post.is_syncable() {
            debug!("skipping post without title or content");
            return Ok(SyncOutcome::Skipped(SkipReason::Incomplete));
        }

        let post_id = post.id;
        let request = gist_request_for(post)?;
        let mut state = self.store.load_state(post_id)?;
        let action = SyncAction::for_state(&state);
        debug!(?action, "syncing post");

        let outcome = match self.write_gist(&action, &request).await {
            Ok(meta) => {
                info!(gist = meta.id(), "post synced");
                state.record_success(meta.clone());
                SyncOutcome::Synced(meta)
            }
            Err(error) => {
                let message = failure_message(error.to_string());
                warn!(error = %message, "post sync failed");
                state.record_failure(message.clone());
                SyncOutcome::Failed(message)
            }
        };

        self.store.save_state(post_id, &state)?;
        Ok(outcome)
    }

    /// Checks that the stored credentials are accepted by GitHub.
    ///
    /// # Errors
    ///
    /// Returns the GitHub error if the user lookup fails.
    #[instrument(skip(self), fields(username = %self.credentials.username))]
    pub async fn check_credentials(&self) -> gistpress_github::Result<UserInfo> {
        self.client
            .get_user(&self.credentials.username, &self.credentials.access_token)
            .await
    }

    /// Returns the stored sync status of a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the post store fails.
    pub fn status(&self, post: PostId) -> Result<SyncStatus> {
        Ok(SyncStatus::new(post, self.store.load_state(post)?))
    }

    /// Writes the gist, then re-reads it and trims the result.
    async fn write_gist(
        &self,
        action: &SyncAction,
        request: &GistRequest,
    ) -> gistpress_github::Result<GistMeta> {
        let token = &self.credentials.access_token;
        let written = match action {
            SyncAction::Create => self.client.create_gist(token, request).await?,
            SyncAction::Edit(id) => self.client.edit_gist(id, token, request).await?,
        };
        let id = gist_id(&written).ok_or_else(missing_gist_id)?.to_string();

        let fetched = self.client.get_gist(&id, token).await?;
        GistMeta::from_gist(fetched).map_err(|e| GitHubError::UnexpectedResponse(e.to_string()))
    }
}

fn missing_gist_id() -> GitHubError {
    GitHubError::UnexpectedResponse(gistpress_protocol::ProtocolError::MissingGistId.to_string())
}
