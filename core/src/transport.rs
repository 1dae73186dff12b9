//! Moving `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the only place the client performs I/O. `UreqTransport`
//! is the blocking implementation; tests substitute in-memory fakes.

use tracing::trace;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one request and returns the response, whatever its status.
///
/// Only failures that leave no HTTP response (refused connections, broken
/// bodies) are errors.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a ureq agent.
///
/// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses
/// are returned as data.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(&request.url), &request.headers).call(),
            HttpMethod::Delete => {
                with_headers(self.agent.delete(&request.url), &request.headers).call()
            }
            HttpMethod::Post => send_with_body(
                with_headers(self.agent.post(&request.url), &request.headers),
                request.body.as_deref(),
            ),
            HttpMethod::Put => send_with_body(
                with_headers(self.agent.put(&request.url), &request.headers),
                request.body.as_deref(),
            ),
        };
        let mut response = result.map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Body(e.to_string()))?;
        trace!(status, bytes = body.len(), "response body read");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify(err: ureq::Error) -> TransportError {
    match err {
        invalid @ (ureq::Error::BadUri(_) | ureq::Error::Http(_)) => {
            TransportError::InvalidRequest(invalid.to_string())
        }
        other => TransportError::Connection(other.to_string()),
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_with_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_url_is_an_invalid_request_not_a_connection_failure() {
        let request = HttpRequest::new(HttpMethod::Get, "http://127.0.0.1:9/resources?name=Electric Fan");
        let err = UreqTransport::new().execute(&request).unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)), "got {err:?}");
    }

    #[test]
    fn malformed_header_is_an_invalid_request() {
        let request = HttpRequest::new(HttpMethod::Get, "http://127.0.0.1:9/resources")
            .header("bad header", "x");
        let err = UreqTransport::new().execute(&request).unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)), "got {err:?}");
    }
}
