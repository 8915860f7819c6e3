//! Error types for the cheetah library.
//!
//! The service reports failures in three flavours (authorization,
//! temporary, permanent). Those map one-to-one onto the first three
//! variants of [`Error`]. Transport and input validation failures are
//! kept separate because they never come from the service itself.

use thiserror::Error;

/// The unified error type for cheetah operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The session or credentials were rejected by the service.
    #[error("authorization error: {0}")]
    Auth(String),

    /// The service reported a transient failure; the caller may retry later.
    #[error("temporary error: {0}")]
    Temporary(String),

    /// The request cannot succeed as sent; retrying will not help.
    #[error("permanent error: {0}")]
    Permanent(String),

    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid configuration or arguments.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Service-level failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Auth,
    Temporary,
    Permanent,
}

impl Error {
    /// Returns the service failure class, or `None` for transport and
    /// validation errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Auth(_) => Some(ErrorKind::Auth),
            Error::Temporary(_) => Some(ErrorKind::Temporary),
            Error::Permanent(_) => Some(ErrorKind::Permanent),
            Error::Transport(_) | Error::InvalidInput(_) => None,
        }
    }

    /// Returns true if the caller may reasonably retry the same call later.
    pub fn is_temporary(&self) -> bool {
        self.kind() == Some(ErrorKind::Temporary)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The HTTP client could not be built.
    #[error("client setup failed: {message}")]
    Setup { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            TransportError::Setup {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid service host or URL.
    #[error("invalid host '{value}': {reason}")]
    Host { value: String, reason: String },

    /// Invalid whitelist filter pattern.
    #[error("invalid whitelist filter '{value}': {reason}")]
    WhitelistFilter { value: String, reason: String },

    /// A required option was missing or empty.
    #[error("missing required option '{name}'")]
    MissingOption { name: &'static str },

    /// Options document could not be parsed.
    #[error("invalid options: {reason}")]
    Options { reason: String },
}
