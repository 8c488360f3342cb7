//! Error types for the cantus client.
//!
//! One unified error type with explicit variants for transport,
//! authentication, HTTP status, decoding and input validation failures.
//! A poll that times out without converging is not an error; see
//! [`crate::poll`].

use std::fmt;
use thiserror::Error;

/// The unified error type for cantus operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The durable credential could not be exchanged for a session.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The service answered with a non-success status.
    #[error("http error: {0}")]
    Http(#[from] HttpError),

    /// Re-authentication triggered by a 401 failed.
    #[error("re-authentication failed: {0}")]
    Reauth(#[source] Box<Error>),

    /// A successful reply whose body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input validation errors (base URL, credential format).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Wrap an error raised while re-authenticating after a 401.
    pub fn reauth(err: Error) -> Self {
        Error::Reauth(Box::new(err))
    }

    /// Returns the HTTP status if this is an [`Error::Http`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.status),
            _ => None,
        }
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

    /// Anything else the HTTP stack reported.
    #[error("{message}")]
    Other { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider reported no active session for the cookie.
    #[error("no active session, the cookie may be invalid or expired")]
    NoActiveSession,

    /// The token renewal reply carried no token.
    #[error("token renewal returned no token")]
    MissingToken,
}

/// A non-success HTTP reply.
#[derive(Debug)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Body text, or the canonical reason when the body was empty.
    pub message: String,
}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected status code [{}]", self.status)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// The cookie cannot be sent as a header value.
    #[error("cookie is not a valid header value")]
    Cookie,

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}
