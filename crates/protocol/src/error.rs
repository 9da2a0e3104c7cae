//! Error types for the gistpress-protocol crate.
//!
//! This module defines the errors that can occur when building protocol
//! types from untrusted data, such as a gist representation returned by
//! the GitHub API.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A gist representation did not carry a usable `id`.
    #[error("Unexpected response format (missing Gist ID)")]
    MissingGistId,
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProtocolError::MissingGistId;
        assert_eq!(
            err.to_string(),
            "Unexpected response format (missing Gist ID)"
        );
    }
}
