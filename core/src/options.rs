//! Per-call request configuration.
//!
//! # Design
//! `RequestOptions` is the caller's half of a request descriptor: everything
//! except the URL. Nothing in it is interpreted by the wrapper apart from the
//! headers, which are merged over `DEFAULT_HEADERS`. The timeout is forwarded
//! to the transport untouched.

use std::time::Duration;

use serde::Serialize;

use crate::http::HttpMethod;

/// Headers sent with every request unless the caller supplies the same name.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[("Content-Type", "application/json")];

/// Caller-supplied request configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Append a header. Repeating a name sends it more than once.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Raw request body, sent as-is.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the request body.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_string(value)?);
        Ok(self)
    }

    /// Upper bound for the whole call, enforced by the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Merge caller headers over defaults.
///
/// A default is dropped when any override has the same name (ASCII
/// case-insensitive). Defaults keep their order and come first; overrides
/// follow in caller order, duplicates included.
pub fn merge_headers(
    defaults: &[(&str, &str)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .iter()
        .filter(|(name, _)| !overrides.iter().any(|(o, _)| o.eq_ignore_ascii_case(name)))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    merged.extend(overrides.iter().cloned());
    merged
}
