//! Error types for the fetch wrapper.
//!
//! # Design
//! Only failure statuses become a `FetchError`; it always carries the status,
//! the reason phrase, and whatever could be read from the body. A 2xx body
//! that is not JSON is a plain `Decode` error with no text fallback. Transport
//! failures are carried in `Transport` exactly as the transport produced them.

use std::convert::Infallible;

use serde::Serialize;
use serde_json::Value;

/// Body of a failure response: parsed JSON when possible, raw text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorData {
    Json(Value),
    Text(String),
}

impl ErrorData {
    /// Try JSON first and fall back to the raw text.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str(json_text(body)) {
            Ok(value) => ErrorData::Json(value),
            Err(_) => ErrorData::Text(body.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ErrorData::Json(value) => Some(value),
            ErrorData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ErrorData::Json(_) => None,
            ErrorData::Text(text) => Some(text),
        }
    }
}

/// The body with a leading UTF-8 byte order mark removed, ready for
/// `serde_json`.
pub(crate) fn json_text(body: &str) -> &str {
    body.strip_prefix('\u{feff}').unwrap_or(body)
}

/// A response whose status was outside 2xx.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Error {status}: {status_text}")]
pub struct FetchError {
    pub status: u16,
    pub status_text: String,
    pub data: ErrorData,
}

/// Everything a single fetch can fail with.
///
/// `E` is the transport's own error type. Pure parsing never touches a
/// transport, so it uses the uninhabited default.
#[derive(Debug, thiserror::Error)]
pub enum Error<E = Infallible> {
    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Http(#[from] FetchError),

    /// A 2xx body could not be decoded into the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(E),
}

impl<E> Error<E> {
    /// The typed failure, when the server answered with an error status.
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            Error::Http(failure) => Some(failure),
            _ => None,
        }
    }

    /// HTTP status of the failure, if there was a response at all.
    pub fn status(&self) -> Option<u16> {
        self.fetch_error().map(|failure| failure.status)
    }
}

impl Error<Infallible> {
    /// Re-type a parse error for a call that went through a transport.
    pub fn with_transport<E>(self) -> Error<E> {
        match self {
            Error::Http(failure) => Error::Http(failure),
            Error::Decode(err) => Error::Decode(err),
            Error::Transport(never) => match never {},
        }
    }
}
