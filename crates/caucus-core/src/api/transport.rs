//! Blocking JSON transport used by the retrieval client.
//!
//! [`Transport`] is the seam between pagination logic and the network.
//! [`HttpTransport`] talks to the real API through `ureq`; tests substitute
//! in-memory fakes.

use std::time::Duration;

use serde_json::Value;

/// One failed GET.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP {code} from {url}")]
    Status { url: String, code: u16 },

    /// Connection, DNS, TLS or read failure before a status was received.
    #[error("request to {url} failed: {message}")]
    Connection { url: String, message: String },

    /// The body was not valid JSON.
    #[error("invalid JSON from {url}: {message}")]
    Decode { url: String, message: String },
}

impl TransportError {
    /// Server errors and connection failures may succeed on retry; client
    /// errors and undecodable bodies will not.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Status { code, .. } => *code >= 500,
            Self::Connection { .. } => true,
            Self::Decode { .. } => false,
        }
    }
}

/// Performs a single blocking GET and decodes the body as JSON.
pub trait Transport {
    /// # Errors
    ///
    /// Returns a [`TransportError`] describing why no JSON body was obtained.
    fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        (**self).get_json(url)
    }
}

/// `ureq`-backed transport with a fixed user agent and read timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    #[must_use]
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(user_agent)
            .timeout_read(timeout)
            .build();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .agent
            .get(url)
            .set("Accept", "application/json")
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => TransportError::Status {
                    url: url.to_string(),
                    code,
                },
                ureq::Error::Transport(transport) => TransportError::Connection {
                    url: url.to_string(),
                    message: transport.to_string(),
                },
            })?;

        response
            .into_json::<Value>()
            .map_err(|err| TransportError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            })
    }
}
