//! Declarative settings fields and their validators.
//!
//! Each user-editable setting is described by a [`Field`] in [`FIELDS`]:
//! its key, a human-readable title, and the rule its value must satisfy.
//! [`sanitize`] applies the rules the lenient way (invalid values are
//! blanked, unknown post types dropped) while [`Config::validate`] applies
//! them strictly through [`validate_field`].
//!
//! [`Config::validate`]: crate::Config::validate

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::error::{ConfigError, Result};

const USERNAME_PATTERN: &str = "^[a-zA-Z0-9_]+$";
const ACCESS_TOKEN_PATTERN: &str = "^[a-zA-Z0-9_-]+$";
const POST_TYPE_PATTERN: &str = "^[a-z0-9_-]+$";

// A pattern that fails to compile rejects every value.
static USERNAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(USERNAME_PATTERN).ok());
static ACCESS_TOKEN_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(ACCESS_TOKEN_PATTERN).ok());
static POST_TYPE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(POST_TYPE_PATTERN).ok());

fn matches(re: &LazyLock<Option<Regex>>, value: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(value))
}

/// Key of the GitHub username setting.
pub const GITHUB_USERNAME: &str = "github_username";

/// Key of the GitHub access token setting.
pub const GITHUB_ACCESS_TOKEN: &str = "github_access_token";

/// Key of the enabled post types setting.
pub const ENABLED_POST_TYPES: &str = "enabled_post_types";

/// Post types that can never be mirrored into a gist.
pub const EXCLUDED_POST_TYPES: &[&str] = &["attachment"];

/// A single validated setting.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// The setting key.
    pub key: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Description of the accepted values, used in error messages.
    pub rule: &'static str,
    /// Returns `true` if the value is acceptable.
    pub validator: fn(&str) -> bool,
}

impl Field {
    /// Checks a value against this field's validator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] if the value is rejected.
    pub fn check(&self, value: &str) -> Result<()> {
        if (self.validator)(value) {
            Ok(())
        } else {
            Err(ConfigError::InvalidSetting {
                key: self.key,
                reason: format!("{} must match {}", self.title, self.rule),
            })
        }
    }
}

/// All validated settings.
pub static FIELDS: &[Field] = &[
    Field {
        key: GITHUB_USERNAME,
        title: "GitHub username",
        rule: "[a-zA-Z0-9_]+",
        validator: is_valid_username,
    },
    Field {
        key: GITHUB_ACCESS_TOKEN,
        title: "GitHub access token",
        rule: "[a-zA-Z0-9_-]+",
        validator: is_valid_access_token,
    },
    Field {
        key: ENABLED_POST_TYPES,
        title: "Post type",
        rule: "[a-z0-9_-]+ (attachments excluded)",
        validator: is_valid_post_type,
    },
];

/// Looks up a field by key.
#[must_use]
pub fn field(key: &str) -> Option<&'static Field> {
    FIELDS.iter().find(|f| f.key == key)
}

/// Validates a value for the setting with the given key.
///
/// Unknown keys are accepted unchanged.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSetting`] if the value is rejected.
///
/// # Examples
///
/// ```
/// use gistpress_config::settings::{validate_field, GITHUB_USERNAME};
///
/// assert!(validate_field(GITHUB_USERNAME, "octo_cat").is_ok());
/// assert!(validate_field(GITHUB_USERNAME, "octo-cat").is_err());
/// ```
pub fn validate_field(key: &str, value: &str) -> Result<()> {
    match field(key) {
        Some(f) => f.check(value),
        None => Ok(()),
    }
}

/// Returns `true` if the username matches `[a-zA-Z0-9_]+`.
#[must_use]
pub fn is_valid_username(value: &str) -> bool {
    matches(&USERNAME_RE, value)
}

/// Returns `true` if the token matches `[a-zA-Z0-9_-]+`.
#[must_use]
pub fn is_valid_access_token(value: &str) -> bool {
    matches(&ACCESS_TOKEN_RE, value)
}

/// Returns `true` if the value is a post type key that may be synced.
#[must_use]
pub fn is_valid_post_type(value: &str) -> bool {
    matches(&POST_TYPE_RE, value) && !EXCLUDED_POST_TYPES.contains(&value)
}

/// Blanks invalid settings in place, the way a settings form would on save.
///
/// Invalid usernames become empty, invalid tokens are removed, and invalid
/// or duplicate post types are dropped. Returns the keys that were changed.
///
/// # Examples
///
/// ```
/// use gistpress_config::{settings, Config};
///
/// let mut config = Config::default();
/// config.github.username = "not valid!".to_string();
/// config.enabled_post_types = vec!["post".into(), "attachment".into()];
///
/// let changed = settings::sanitize(&mut config);
/// assert_eq!(changed, vec![settings::GITHUB_USERNAME, settings::ENABLED_POST_TYPES]);
/// assert!(config.github.username.is_empty());
/// assert_eq!(config.enabled_post_types, vec!["post".to_string()]);
/// ```
pub fn sanitize(config: &mut Config) -> Vec<&'static str> {
    let mut changed = Vec::new();

    let username = config.github.username.trim();
    if !username.is_empty() && !is_valid_username(username) {
        config.github.username.clear();
        changed.push(GITHUB_USERNAME);
    }

    if config
        .github
        .access_token
        .as_deref()
        .is_some_and(|token| !is_valid_access_token(token.trim()))
    {
        config.github.access_token = None;
        changed.push(GITHUB_ACCESS_TOKEN);
    }

    let original = std::mem::take(&mut config.enabled_post_types);
    let mut kept: Vec<String> = Vec::with_capacity(original.len());
    for post_type in original.iter().map(|t| t.trim()) {
        if is_valid_post_type(post_type) && !kept.iter().any(|k| k == post_type) {
            kept.push(post_type.to_string());
        }
    }
    if kept != original {
        changed.push(ENABLED_POST_TYPES);
    }
    config.enabled_post_types = kept;

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rule() {
        assert!(is_valid_username("octocat"));
        assert!(is_valid_username("octo_cat_42"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("octo-cat"));
        assert!(!is_valid_username("octo cat"));
    }

    #[test]
    fn access_token_rule() {
        assert!(is_valid_access_token("ghp_abcDEF123"));
        assert!(is_valid_access_token("a-b_c"));
        assert!(!is_valid_access_token(""));
        assert!(!is_valid_access_token("abc def"));
        assert!(!is_valid_access_token("abc.def"));
    }

    #[test]
    fn post_type_rule() {
        assert!(is_valid_post_type("post"));
        assert!(is_valid_post_type("page"));
        assert!(is_valid_post_type("my_custom-type2"));
        assert!(!is_valid_post_type("attachment"));
        assert!(!is_valid_post_type("Post"));
        assert!(!is_valid_post_type(""));
    }

    #[test]
    fn patterns_compile() {
        for re in [&USERNAME_RE, &ACCESS_TOKEN_RE, &POST_TYPE_RE] {
            assert!(re.is_some());
        }
    }

    #[test]
    fn rules_reject_trailing_newline() {
        assert!(!is_valid_username("octocat\n"));
        assert!(!is_valid_access_token("ghp_x\n"));
        assert!(!is_valid_post_type("post\n"));
    }

    #[test]
    fn every_key_has_a_field() {
        for key in [GITHUB_USERNAME, GITHUB_ACCESS_TOKEN, ENABLED_POST_TYPES] {
            assert!(field(key).is_some(), "missing field for {key}");
        }
        assert!(field("unknown").is_none());
    }

    #[test]
    fn validate_field_reports_key_and_rule() {
        let err = validate_field(GITHUB_ACCESS_TOKEN, "has space").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for github_access_token: GitHub access token must match [a-zA-Z0-9_-]+"
        );
    }

    #[test]
    fn validate_field_ignores_unknown_keys() {
        assert!(validate_field("something_else", "!!!").is_ok());
    }

    #[test]
    fn sanitize_leaves_valid_config_alone() {
        let mut config = Config::default();
        config.github.username = "octocat".to_string();
        config.github.access_token = Some("ghp_token".to_string());

        assert!(sanitize(&mut config).is_empty());
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.github.access_token.as_deref(), Some("ghp_token"));
        assert_eq!(config.enabled_post_types, vec!["post".to_string()]);
    }

    #[test]
    fn sanitize_blanks_invalid_token() {
        let mut config = Config::default();
        config.github.access_token = Some("bad token".to_string());

        assert_eq!(sanitize(&mut config), vec![GITHUB_ACCESS_TOKEN]);
        assert!(config.github.access_token.is_none());
    }

    #[test]
    fn sanitize_dedupes_post_types() {
        let mut config = Config::default();
        config.enabled_post_types = vec!["post".into(), " page ".into(), "post".into()];

        assert_eq!(sanitize(&mut config), vec![ENABLED_POST_TYPES]);
        assert_eq!(
            config.enabled_post_types,
            vec!["post".to_string(), "page".to_string()]
        );
    }
}
