//! Request/response plumbing under [`crate::client::GameClient`].

use crate::client::ClientError;
use core::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Message shown for a non-2xx answer that carries no readable reason.
pub const GENERIC_STATUS_MESSAGE: &str = "the server rejected the request";

/// Something that can POST a JSON body and hand back the response text.
///
/// The HTTP implementation is [`HttpTransport`]; tests plug in an
/// in-memory backend.
pub trait Transport {
    fn post_json(&mut self, path: &str, body: &str) -> Result<String, ClientError>;
}

/// Blocking HTTP transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    agent: ureq::Agent,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HttpTransport({})", self.base_url)
    }
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { base_url: base_url.trim_end_matches('/').to_string(), agent }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn post_json(&mut self, path: &str, body: &str) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, bytes = body.len(), "POST");
        match self.agent.post(&url).set("Content-Type", "application/json").send_string(body) {
            Ok(resp) => resp.into_string().map_err(|e| ClientError::Transport(e.to_string())),
            Err(ureq::Error::Status(status, resp)) => {
                let text = resp.into_string().unwrap_or_default();
                let message = status_message(&text);
                warn!(%url, status, %message, "server returned an error status");
                Err(ClientError::Status { status, message })
            }
            Err(ureq::Error::Transport(t)) => Err(ClientError::Transport(t.to_string())),
        }
    }
}

/// Reason carried in an error body (`error` or `message` field), or the
/// generic text.
pub fn status_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_STATUS_MESSAGE.to_string())
}
