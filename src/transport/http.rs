//! HTTP transport backed by reqwest.
//!
//! # Responsibilities
//! - Translate an [`EffectiveRequest`] into a real HTTP call
//! - Observe the cancellation token before and during the call
//! - Normalize response headers for hook consumption

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tokio_util::sync::CancellationToken;

use crate::config::EffectiveRequest;
use crate::transport::{RawResponse, Transport, TransportError};

/// Transport that performs real HTTP calls through a pooled client.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Transport with a fresh client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Reuse an existing client (shared connection pool).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(
        &self,
        request: &EffectiveRequest,
        token: CancellationToken,
    ) -> Result<RawResponse, TransportError> {
        if token.is_cancelled() {
            return Err(TransportError::Cancelled);
        }

        let method = Method::from_str(&request.method)
            .map_err(|_| TransportError::Method(request.method.clone()))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = tokio::select! {
            _ = token.cancelled() => return Err(TransportError::Cancelled),
            result = builder.send() => {
                result.map_err(|e| TransportError::Network(e.to_string()))?
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = tokio::select! {
            _ = token.cancelled() => return Err(TransportError::Cancelled),
            result = response.bytes() => {
                result.map_err(|e| TransportError::Body(e.to_string()))?
            }
        };

        Ok(RawResponse::new(status.as_u16(), headers, body.to_vec()))
    }
}
