//! Executes core-built requests over HTTP.
//!
//! [`Transport`] is the seam between the runner and the network; [`Session`]
//! is the `ureq` implementation, reusing one agent (and its connection pool)
//! across every case of a run.

use std::time::Duration;

use todo_core::{HttpMethod, HttpRequest, HttpResponse};
use tracing::trace;

use crate::error::TransportError;

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking HTTP session backed by a shared `ureq::Agent`.
#[derive(Clone)]
pub struct Session {
    agent: ureq::Agent,
}

impl Session {
    /// `timeout` bounds each whole request; `None` keeps ureq's defaults.
    ///
    /// Status codes are never turned into errors: 404 and 500 are answers
    /// the catalog expects, not transport failures.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for Session {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        trace!(method = %request.method, url = %request.path, "sending request");
        let url = request.path.as_str();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(url).send_empty(),
            (HttpMethod::Patch, Some(body)) => self
                .agent
                .patch(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => self.agent.patch(url).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::new(request, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(request, e))?;
        trace!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
