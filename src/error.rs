use crate::validation::{InputError, ValidationError};

/// All errors that can occur while validating scores or talking to the league backend.
#[derive(thiserror::Error, Debug)]
pub enum LeagueError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read or decode the response body.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The score is not a legal completed set.
    #[error("invalid score: {0}")]
    Validation(#[from] ValidationError),

    /// A score field could not be parsed.
    #[error(transparent)]
    Input(#[from] InputError),

    /// A new match is missing a required field; nothing was sent.
    #[error("cannot create match: {field} is required")]
    IncompleteMatch { field: &'static str },

    /// `sign_in` was called on a client built without a [`crate::Session`].
    #[error("client has no session to sign in to")]
    NoSession,

    /// The session token could not be decoded.
    #[error("invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Client settings could not be loaded.
    #[error("invalid client settings: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, LeagueError>;
