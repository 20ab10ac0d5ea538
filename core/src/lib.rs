//! JSON fetch wrapper.
//!
//! # Overview
//! Performs one HTTP request with a default `Content-Type: application/json`
//! header and normalizes the outcome: the decoded JSON body, `None` for
//! `204 No Content`, or a `FetchError` carrying status, reason phrase and the
//! best-effort body of any non-2xx response.
//!
//! # Design
//! - `build_request` / `parse_response` work on plain data (host-does-IO), so
//!   the classification rules are testable without a network.
//! - `Transport` is the only I/O seam. `UreqTransport` (feature `ureq`, on by
//!   default) is the bundled implementation.
//! - `Fetcher` holds only its transport, so concurrent calls are independent.
//! - Transport failures are returned as the transport's own error type inside
//!   `Error::Transport`, never translated.

pub mod client;
pub mod error;
pub mod http;
pub mod options;
pub mod transport;

#[cfg(feature = "ureq")]
pub use client::fetch;
pub use client::{build_request, parse_response, Fetcher};
pub use error::{Error, ErrorData, FetchError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, InvalidMethod};
pub use options::{merge_headers, RequestOptions, DEFAULT_HEADERS};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::Transport;
