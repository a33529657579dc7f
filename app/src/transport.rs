//! Executes core-built requests over real HTTP.

use employee_core::{ApiError, Exchange, HttpMethod, HttpRequest, HttpResponse};

/// Performs one request/response exchange. Transport failures come back as
/// `ApiError::Network`; every HTTP status, including 4xx/5xx, is returned as
/// a response for the core to interpret.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Exchange;
}

/// Blocking transport backed by a ureq agent.
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
    fn execute(&self, request: &HttpRequest) -> Exchange {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let body = request.body.as_deref();
        let sent = match (request.method, body) {
            (HttpMethod::Get, _) => self.agent.get(&request.url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&request.url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&request.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&request.url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&request.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&request.url).send_empty(),
        };
        let mut response = sent.map_err(|e| {
            tracing::warn!(url = %request.url, error = %e, "request failed");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(status, "received response");

        Ok(HttpResponse { status, headers, body })
    }
}
