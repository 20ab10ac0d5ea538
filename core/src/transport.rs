//! The I/O seam: something that turns one `HttpRequest` into one
//! `HttpResponse`.
//!
//! # Design
//! A transport must report every status as data. Turning failure statuses
//! into errors is `parse_response`'s job, so transports that raise on 4xx/5xx
//! by default (ureq does) need that switched off. A transport error means no
//! response was received at all.

use crate::http::{HttpRequest, HttpResponse};

/// Executes exactly one HTTP round-trip.
pub trait Transport {
    type Error;

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use ureq::http::{Request, Response};
    use ureq::{Agent, AsSendBody, Body};

    use super::Transport;
    use crate::http::{HttpRequest, HttpResponse};

    /// Blocking transport backed by a shared `ureq::Agent`.
    ///
    /// Cloning is cheap and clones share the agent's connection pool.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }

        fn run<S: AsSendBody>(
            &self,
            request: Request<S>,
            timeout: Option<std::time::Duration>,
        ) -> Result<Response<Body>, ureq::Error> {
            let request = self
                .agent
                .configure_request(request)
                .timeout_global(timeout)
                .build();
            self.agent.run(request)
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        type Error = ureq::Error;

        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ureq::Error> {
            let mut builder = Request::builder()
                .method(request.method.as_str())
                .uri(request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let mut response = match request.body {
                Some(body) => self.run(builder.body(body)?, request.timeout)?,
                None => self.run(builder.body(())?, request.timeout)?,
            };

            let status = response.status();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            // ureq caps bodies at 10 MiB by default; a received status must
            // never turn into a transport error.
            let body = response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_string()?;

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                headers,
                body,
            })
        }
    }
}
