//! Error types for GitHub API operations.
//!
//! Every failure of a gist request falls into one of four classes: the
//! request never completed ([`Error::Transport`]), the response body was not
//! usable JSON ([`Error::Decode`]), GitHub answered with an unsuccessful
//! status ([`Error::Api`]), or a successful response lacked a field the caller
//! relies on ([`Error::UnexpectedResponse`]).
//!
//! The `Display` form of each variant is the bare message meant for users;
//! it is what gets stored with a post when a sync fails.

/// Message used when a response body is empty or is not valid JSON.
pub const JSON_PARSE_ERROR: &str = "JSON parse error";

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request failed before a response was received.
    ///
    /// Covers connection failures, DNS errors and timeouts.
    #[error("{message}")]
    Transport {
        /// The underlying error message, with the request URL removed.
        message: String,
        /// Whether the request was aborted by the client timeout.
        timed_out: bool,
    },

    /// The response body was empty or could not be decoded as JSON.
    #[error("JSON parse error")]
    Decode {
        /// The HTTP status code of the response.
        status: u16,
    },

    /// GitHub answered with a status outside the accepted set.
    #[error("{message}")]
    Api {
        /// The HTTP status code of the response.
        status: u16,
        /// The message reported by GitHub, or a synthesized one.
        message: String,
    },

    /// A successful response was missing an expected field.
    #[error("{0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// Builds a transport error from a `reqwest` failure.
    ///
    /// The request URL is stripped because it carries the access token.
    pub(crate) fn transport(error: reqwest::Error) -> Self {
        let timed_out = error.is_timeout();
        let error = error.without_url();

        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self::Transport { message, timed_out }
    }

    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Decode { status } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A specialized Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, Error>;
