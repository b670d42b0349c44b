//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the one place I/O happens. `TodoClient` stays pure; the
//! blocking `UreqTransport` performs the round-trip with ureq's
//! status-as-error behavior disabled, so 4xx/5xx come back as data and the
//! client decides what they mean.

use thiserror::Error;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// The request could not be completed at the connection level.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking HTTP transport backed by a shared `ureq::Agent`.
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
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let result = match method {
            HttpMethod::Get | HttpMethod::Delete => {
                let mut builder = if method == HttpMethod::Get {
                    self.agent.get(path.as_str())
                } else {
                    self.agent.delete(path.as_str())
                };
                for (key, value) in &headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Patch => {
                let mut builder = if method == HttpMethod::Post {
                    self.agent.post(path.as_str())
                } else {
                    self.agent.patch(path.as_str())
                };
                for (key, value) in &headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError(format!("{method} {path}: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(format!("{method} {path}: reading body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}
