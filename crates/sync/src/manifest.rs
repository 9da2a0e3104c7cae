//! The set of gist files derived from a post.
//!
//! A post is mirrored as two files named after its id:
//!
//! | File | Content |
//! |---|---|
//! | `post-{id}.txt` | The post body |
//! | `post-{id}.json` | A JSON snapshot of the whole post record |
//!
//! The gist description is the post title, and the gist is public only for
//! published posts.

use gistpress_github::GistRequest;
use gistpress_protocol::{Post, PostId};

use crate::error::{Result, SyncError};

/// Returns the name of the file holding the post body.
#[must_use]
pub fn content_file_name(id: PostId) -> String {
    format!("post-{id}.txt")
}

/// Returns the name of the file holding the post record snapshot.
#[must_use]
pub fn record_file_name(id: PostId) -> String {
    format!("post-{id}.json")
}

/// Builds the gist request mirroring a post.
///
/// # Errors
///
/// Returns [`SyncError::Snapshot`] if the post record cannot be serialized.
///
/// # Examples
///
/// ```
/// use gistpress_protocol::{Post, PostStatus};
/// use gistpress_sync::manifest::gist_request_for;
///
/// let post = Post::new(7, "Hello", "World").with_status(PostStatus::Publish);
/// let request = gist_request_for(&post).unwrap();
///
/// assert_eq!(request.description, "Hello");
/// assert!(request.is_public);
/// assert_eq!(request.files["post-7.txt"].content, "World");
/// assert!(request.files.contains_key("post-7.json"));
/// ```
pub fn gist_request_for(post: &Post) -> Result<GistRequest> {
    let id = post.id;
    let snapshot = serde_json::to_string(post).map_err(|source| SyncError::Snapshot {
        post: id,
        source,
    })?;

    Ok(GistRequest::new(post.title.clone(), post.is_public())
        .with_file(content_file_name(id), post.content.clone())
        .with_file(record_file_name(id), snapshot))
}
