//! Post-related types.
//!
//! This module defines the post record handed to gistpress by the blog
//! engine when a post is saved. Field names follow the blog engine's own
//! record layout (`ID`, `post_title`, `post_content`, ...) so that the JSON
//! snapshot uploaded alongside the content is a faithful copy of the record.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Identifier of a post in the blog engine.
///
/// # Examples
///
/// ```
/// use gistpress_protocol::PostId;
///
/// let id = PostId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    /// Wraps a raw post identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication status of a post.
///
/// Only [`PostStatus::Publish`] makes the mirrored gist public. Statuses the
/// blog engine may add in the future are kept verbatim in
/// [`PostStatus::Other`].
///
/// # Examples
///
/// ```
/// use gistpress_protocol::PostStatus;
///
/// let status: PostStatus = serde_json::from_str(r#""publish""#).unwrap();
/// assert_eq!(status, PostStatus::Publish);
///
/// let status: PostStatus = serde_json::from_str(r#""archived""#).unwrap();
/// assert_eq!(status, PostStatus::Other("archived".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    /// Published and visible to everyone.
    Publish,
    /// Saved but not published.
    #[default]
    Draft,
    /// Awaiting review.
    Pending,
    /// Visible to logged-in editors only.
    Private,
    /// Scheduled for publication.
    Future,
    /// In the trash.
    Trash,
    /// Freshly created and never saved by the author.
    AutoDraft,
    /// Inherits the status of its parent (revisions and attachments).
    Inherit,
    /// Any status not known to gistpress.
    Other(String),
}

impl PostStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Publish => "publish",
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Private => "private",
            Self::Future => "future",
            Self::Trash => "trash",
            Self::AutoDraft => "auto-draft",
            Self::Inherit => "inherit",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for PostStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "publish" => Self::Publish,
            "draft" => Self::Draft,
            "pending" => Self::Pending,
            "private" => Self::Private,
            "future" => Self::Future,
            "trash" => Self::Trash,
            "auto-draft" => Self::AutoDraft,
            "inherit" => Self::Inherit,
            _ => Self::Other(value),
        }
    }
}

impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The content type of a post record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostKind {
    /// A regular blog post.
    #[default]
    Post,
    /// A static page.
    Page,
    /// A stored revision of another post.
    Revision,
    /// Custom post types.
    Other(String),
}

impl PostKind {
    /// Returns the wire name of the post type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Post => "post",
            Self::Page => "page",
            Self::Revision => "revision",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for PostKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "post" => Self::Post,
            "page" => Self::Page,
            "revision" => Self::Revision,
            _ => Self::Other(value),
        }
    }
}

impl From<PostKind> for String {
    fn from(kind: PostKind) -> Self {
        match kind {
            PostKind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post record as supplied by the blog engine.
///
/// Fields gistpress does not interpret are preserved in [`Post::extra`] so
/// the record can be serialized back without loss.
///
/// # Examples
///
/// ```
/// use gistpress_protocol::{Post, PostId, PostStatus};
///
/// let post: Post = serde_json::from_str(
///     r#"{"ID": 7, "post_title": "Hello", "post_content": "World", "post_status": "publish"}"#,
/// )
/// .unwrap();
/// assert_eq!(post.id, PostId::new(7));
/// assert!(post.is_public());
/// assert!(post.is_syncable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// The post identifier.
    #[serde(rename = "ID", alias = "id")]
    pub id: PostId,
    /// The post title; becomes the gist description.
    #[serde(rename = "post_title", alias = "title", default)]
    pub title: String,
    /// The post body.
    #[serde(rename = "post_content", alias = "content", default)]
    pub content: String,
    /// Publication status.
    #[serde(rename = "post_status", alias = "status", default)]
    pub status: PostStatus,
    /// Post type.
    #[serde(rename = "post_type", alias = "type", default)]
    pub kind: PostKind,
    /// Parent post, if any. The blog engine encodes "no parent" as `0`.
    #[serde(
        rename = "post_parent",
        alias = "parent",
        default,
        serialize_with = "serialize_parent",
        deserialize_with = "deserialize_parent"
    )]
    pub parent: Option<PostId>,
    /// Every other field of the record, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Creates a draft post with the given identifier, title and content.
    #[must_use]
    pub fn new(id: impl Into<PostId>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            status: PostStatus::Draft,
            kind: PostKind::Post,
            parent: None,
            extra: Map::new(),
        }
    }

    /// Sets the publication status.
    #[must_use]
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the post type.
    #[must_use]
    pub fn with_kind(mut self, kind: PostKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the parent post.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<PostId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Returns `true` if a mirrored gist should be public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.status == PostStatus::Publish
    }

    /// Returns `true` if the post has both a title and content.
    ///
    /// Posts missing either are never mirrored.
    #[must_use]
    pub fn is_syncable(&self) -> bool {
        !self.title.is_empty() && !self.content.is_empty()
    }

    /// Returns `true` if this record is a revision of another post.
    #[must_use]
    pub fn is_revision(&self) -> bool {
        self.kind == PostKind::Revision
    }

    /// Returns the post this record is a revision of, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use gistpress_protocol::{Post, PostId, PostKind};
    ///
    /// let revision = Post::new(12, "t", "c").with_kind(PostKind::Revision).with_parent(10);
    /// assert_eq!(revision.revision_of(), Some(PostId::new(10)));
    ///
    /// let post = Post::new(10, "t", "c");
    /// assert_eq!(post.revision_of(), None);
    /// ```
    #[must_use]
    pub fn revision_of(&self) -> Option<PostId> {
        self.parent.filter(|_| self.is_revision())
    }
}

fn serialize_parent<S: Serializer>(parent: &Option<PostId>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(parent.map_or(0, PostId::get))
}

fn deserialize_parent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<PostId>, D::Error> {
    let raw = Option::<u64>::deserialize(deserializer)?;
    Ok(raw.filter(|id| *id != 0).map(PostId::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_blog_engine_record() {
        let post: Post = serde_json::from_value(json!({
            "ID": 42,
            "post_title": "Title",
            "post_content": "Body",
            "post_status": "draft",
            "post_type": "page",
            "post_parent": 0,
            "post_author": "1",
            "comment_status": "open"
        }))
        .unwrap();

        assert_eq!(post.id, PostId::new(42));
        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "Body");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.kind, PostKind::Page);
        assert_eq!(post.parent, None);
        assert_eq!(post.extra.get("post_author"), Some(&json!("1")));
        assert_eq!(post.extra.get("comment_status"), Some(&json!("open")));
    }

    #[test]
    fn deserialize_short_field_names() {
        let post: Post = serde_json::from_value(json!({
            "id": 3,
            "title": "T",
            "content": "C",
            "status": "publish"
        }))
        .unwrap();
        assert_eq!(post.id, PostId::new(3));
        assert!(post.is_public());
        assert_eq!(post.kind, PostKind::Post);
    }

    #[test]
    fn serialize_keeps_extra_fields_and_engine_names() {
        let mut post = Post::new(5, "T", "C").with_status(PostStatus::Publish);
        post.extra.insert("post_author".to_string(), json!("2"));

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["ID"], json!(5));
        assert_eq!(value["post_title"], json!("T"));
        assert_eq!(value["post_content"], json!("C"));
        assert_eq!(value["post_status"], json!("publish"));
        assert_eq!(value["post_type"], json!("post"));
        assert_eq!(value["post_parent"], json!(0));
        assert_eq!(value["post_author"], json!("2"));
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = PostStatus::from("archived".to_string());
        assert_eq!(status, PostStatus::Other("archived".to_string()));
        assert_eq!(String::from(status), "archived");
    }

    #[test]
    fn only_published_posts_are_public() {
        let post = Post::new(1, "t", "c");
        for status in [
            PostStatus::Draft,
            PostStatus::Pending,
            PostStatus::Private,
            PostStatus::Future,
            PostStatus::Other("publish ".to_string()),
        ] {
            assert!(!post.clone().with_status(status).is_public());
        }
        assert!(post.with_status(PostStatus::Publish).is_public());
    }

    #[test]
    fn syncable_requires_title_and_content() {
        assert!(Post::new(1, "t", "c").is_syncable());
        assert!(!Post::new(1, "", "c").is_syncable());
        assert!(!Post::new(1, "t", "").is_syncable());
        assert!(!Post::new(1, "", "").is_syncable());
    }

    #[test]
    fn revision_without_parent_has_no_origin() {
        let post = Post::new(9, "t", "c").with_kind(PostKind::Revision);
        assert_eq!(post.revision_of(), None);
    }

    #[test]
    fn child_page_is_not_a_revision() {
        let post = Post::new(9, "t", "c").with_kind(PostKind::Page).with_parent(2);
        assert_eq!(post.revision_of(), None);
    }
}
