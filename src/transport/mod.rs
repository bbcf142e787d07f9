//! Transport abstraction.
//!
//! # Responsibilities
//! - Define the contract the lifecycle drives requests through
//! - Surface cancellation as an ordinary failure
//! - Keep response access test-constructible
//!
//! # Design Decisions
//! - Cancellation is cooperative: the transport observes its token and
//!   rejects; it never touches lifecycle state itself
//! - Non-success statuses are transport failures, the same way upstream
//!   5xx responses are treated as errors rather than payloads

pub mod http;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::EffectiveRequest;

pub use http::HttpTransport;

/// Errors surfaced by a transport implementation.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network-level failure (connect, DNS, I/O).
    #[error("request failed: {0}")]
    Network(String),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// The bound cancellation token was triggered before completion.
    #[error("request cancelled")]
    Cancelled,

    /// The effective method is not a valid HTTP method.
    #[error("invalid method '{0}'")]
    Method(String),

    /// The response body could not be read.
    #[error("unreadable response body: {0}")]
    Body(String),
}

/// Raw response handed to the response hook.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl RawResponse {
    /// Build a response from parts. Header names are lowercased for lookup.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_slice(&self.body).map_err(|e| TransportError::Body(e.to_string()))
    }
}

/// Contract between the lifecycle and whatever performs the actual call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request bound to `token`.
    ///
    /// Implementations must reject with [`TransportError::Cancelled`] when
    /// the token is cancelled before or during the call.
    async fn perform(
        &self,
        request: &EffectiveRequest,
        token: CancellationToken,
    ) -> Result<RawResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_accessors() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let response = RawResponse::new(200, headers, b"{\"test\":\"test\"}".to_vec());

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(response.bytes(), b"{\"test\":\"test\"}");

        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["test"], "test");
    }

    #[test]
    fn test_raw_response_json_failure() {
        let response = RawResponse::new(200, HashMap::new(), b"not json".to_vec());
        let result = response.json::<serde_json::Value>();
        assert!(matches!(result, Err(TransportError::Body(_))));
    }
}
