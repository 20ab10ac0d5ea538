//! Request building, response classification, and the `Fetcher` that ties
//! them to a transport.
//!
//! # Design
//! `build_request` and `parse_response` are pure functions over plain data, so
//! a host can run the round-trip itself. `Fetcher` holds nothing but a
//! transport and carries no state between calls; one `fetch` is one
//! `Transport::execute`.

use serde::de::DeserializeOwned;

use crate::error::{json_text, Error, ErrorData, FetchError};
use crate::http::{HttpRequest, HttpResponse};
use crate::options::{merge_headers, RequestOptions, DEFAULT_HEADERS};
use crate::transport::Transport;

const NO_CONTENT: u16 = 204;

/// Describe the request for `url`, with `DEFAULT_HEADERS` merged under the
/// caller's headers. Everything else in `options` passes through unchanged.
pub fn build_request(url: &str, options: RequestOptions) -> HttpRequest {
    HttpRequest {
        method: options.method,
        url: url.to_string(),
        headers: merge_headers(DEFAULT_HEADERS, &options.headers),
        body: options.body,
        timeout: options.timeout,
    }
}

/// Classify a response.
///
/// - 204: `Ok(None)`, whatever the body holds.
/// - any other 2xx: the body decoded as `T`, or `Error::Decode`.
/// - anything else: `Error::Http` with the body as JSON if it parses,
///   otherwise as raw text.
pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<Option<T>, Error> {
    if !response.is_success() {
        let data = ErrorData::from_body(&response.body);
        if let ErrorData::Text(_) = data {
            tracing::warn!(status = response.status, "error response body is not JSON");
        }
        return Err(FetchError {
            status: response.status,
            status_text: response.status_text,
            data,
        }
        .into());
    }

    if response.status == NO_CONTENT {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(json_text(&response.body))?))
}

/// Stateless JSON fetcher over a transport.
#[derive(Debug, Clone, Default)]
pub struct Fetcher<T> {
    transport: T,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one request to `url` and decode the outcome.
    ///
    /// `None` for options means a plain GET with the default headers.
    pub fn fetch<R: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<R>, Error<T::Error>> {
        let request = build_request(url, options.unwrap_or_default());
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.execute(request).map_err(Error::Transport)?;
        tracing::debug!(status = response.status, url, "received response");

        parse_response(response).map_err(|err| err.with_transport())
    }
}

#[cfg(feature = "ureq")]
impl Fetcher<crate::transport::UreqTransport> {
    /// A fetcher over a fresh ureq agent.
    pub fn with_ureq() -> Self {
        Self::new(crate::transport::UreqTransport::new())
    }
}

/// One-shot fetch over a new ureq agent.
///
/// Reuse a `Fetcher` instead when making many calls, so connections are
/// pooled.
#[cfg(feature = "ureq")]
pub fn fetch<R: DeserializeOwned>(
    url: &str,
    options: Option<RequestOptions>,
) -> Result<Option<R>, Error<ureq::Error>> {
    Fetcher::with_ureq().fetch(url, options)
}
