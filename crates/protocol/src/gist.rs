//! Gist metadata persisted alongside each mirrored post.
//!
//! The GitHub API returns a large gist representation. Only a trimmed copy
//! is stored per post: the keys in [`EXCLUDED_GIST_FIELDS`] are dropped
//! because they duplicate the post itself or grow with every edit.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};

/// Top-level gist fields never persisted with a post.
pub const EXCLUDED_GIST_FIELDS: &[&str] = &["description", "files", "forks", "history"];

/// Returns the non-empty string `id` of a gist representation, if any.
///
/// # Examples
///
/// ```
/// use gistpress_protocol::gist_id;
/// use serde_json::json;
///
/// let gist = json!({"id": "abc"});
/// assert_eq!(gist_id(gist.as_object().unwrap()), Some("abc"));
///
/// let gist = json!({"id": ""});
/// assert_eq!(gist_id(gist.as_object().unwrap()), None);
/// ```
#[must_use]
pub fn gist_id(gist: &Map<String, Value>) -> Option<&str> {
    gist.get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// The trimmed gist representation stored for a synced post.
///
/// A `GistMeta` always carries a non-empty string `id` and never carries
/// any of the [`EXCLUDED_GIST_FIELDS`].
///
/// # Examples
///
/// ```
/// use gistpress_protocol::GistMeta;
/// use serde_json::json;
///
/// let gist = json!({
///     "id": "abc",
///     "html_url": "https://gist.github.com/abc",
///     "description": "x",
///     "files": {},
/// });
/// let meta = GistMeta::from_gist(gist.as_object().unwrap().clone()).unwrap();
/// assert_eq!(meta.id(), "abc");
/// assert_eq!(meta.html_url(), Some("https://gist.github.com/abc"));
/// assert!(meta.get("files").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct GistMeta(Map<String, Value>);

impl GistMeta {
    /// Builds metadata from a full gist representation.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingGistId`] if the representation has no
    /// non-empty string `id`.
    pub fn from_gist(mut gist: Map<String, Value>) -> Result<Self> {
        if gist_id(&gist).is_none() {
            return Err(ProtocolError::MissingGistId);
        }
        gist.retain(|key, _| !EXCLUDED_GIST_FIELDS.contains(&key.as_str()));
        Ok(Self(gist))
    }

    /// Returns the gist identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        gist_id(&self.0).unwrap_or_default()
    }

    /// Returns the gist's web URL, if GitHub reported one.
    #[must_use]
    pub fn html_url(&self) -> Option<&str> {
        self.0.get("html_url").and_then(Value::as_str)
    }

    /// Returns a raw field of the stored metadata.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the stored metadata as a JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Map<String, Value>> for GistMeta {
    type Error = ProtocolError;

    fn try_from(gist: Map<String, Value>) -> Result<Self> {
        Self::from_gist(gist)
    }
}

impl From<GistMeta> for Map<String, Value> {
    fn from(meta: GistMeta) -> Self {
        meta.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn from_gist_strips_noisy_fields() {
        let meta = GistMeta::from_gist(object(json!({
            "id": "abc",
            "html_url": "https://gist.github.com/abc",
            "description": "x",
            "files": {"post-1.txt": {"content": "hello"}},
            "forks": [],
            "history": [{"version": "1"}],
            "public": true
        })))
        .unwrap();

        assert_eq!(
            Value::Object(meta.as_map().clone()),
            json!({
                "id": "abc",
                "html_url": "https://gist.github.com/abc",
                "public": true
            })
        );
    }

    #[test]
    fn from_gist_requires_id() {
        assert_eq!(
            GistMeta::from_gist(object(json!({"html_url": "x"}))),
            Err(ProtocolError::MissingGistId)
        );
        assert_eq!(
            GistMeta::from_gist(object(json!({"id": ""}))),
            Err(ProtocolError::MissingGistId)
        );
        assert_eq!(
            GistMeta::from_gist(object(json!({"id": 12}))),
            Err(ProtocolError::MissingGistId)
        );
    }

    #[test]
    fn html_url_is_optional() {
        let meta = GistMeta::from_gist(object(json!({"id": "abc"}))).unwrap();
        assert_eq!(meta.html_url(), None);
    }

    #[test]
    fn deserialize_rejects_missing_id() {
        let result: std::result::Result<GistMeta, _> =
            serde_json::from_value(json!({"html_url": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_filters_excluded_fields() {
        let meta: GistMeta = serde_json::from_value(json!({"id": "a", "files": {}})).unwrap();
        assert!(meta.get("files").is_none());
        assert_eq!(serde_json::to_value(&meta).unwrap(), json!({"id": "a"}));
    }

    proptest! {
        #[test]
        fn from_gist_never_keeps_excluded_fields(
            keys in proptest::collection::vec(
                prop_oneof![
                    Just("description".to_string()),
                    Just("files".to_string()),
                    Just("forks".to_string()),
                    Just("history".to_string()),
                    "[a-z_]{1,12}",
                ],
                0..12,
            ),
            id in "[a-f0-9]{1,32}",
        ) {
            let mut gist = Map::new();
            for key in &keys {
                gist.insert(key.clone(), json!(key.len()));
            }
            gist.insert("id".to_string(), json!(id.clone()));

            let meta = GistMeta::from_gist(gist.clone()).unwrap();
            prop_assert_eq!(meta.id(), id.as_str());
            for excluded in EXCLUDED_GIST_FIELDS {
                prop_assert!(meta.get(excluded).is_none());
            }
            for key in gist.keys().filter(|k| !EXCLUDED_GIST_FIELDS.contains(&k.as_str())) {
                prop_assert_eq!(meta.get(key), gist.get(key));
            }
        }
    }
}
