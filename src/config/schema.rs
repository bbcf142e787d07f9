//! Configuration schema definitions.
//!
//! Per-call and ambient request configuration. All types derive Serde
//! traits so they can be loaded from config files or embedded in a larger
//! application config.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fallback timeout when neither per-call nor ambient config supplies one.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Fallback method when neither per-call nor ambient config supplies one.
pub const DEFAULT_METHOD: &str = "GET";

/// Per-call request configuration. Immutable once handed to a lifecycle.
///
/// The response and error hooks belong to the lifecycle constructor, not to
/// this struct, so that the config stays serializable.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RequestConfig {
    /// Base URL (e.g., "https://api.example.com").
    pub url: String,

    /// Path appended verbatim to the base URL.
    pub endpoint: Option<String>,

    /// Query string appended as `?{query}`.
    pub query: Option<String>,

    /// HTTP method; falls back to the ambient method, then "GET".
    pub method: Option<String>,

    /// Headers merged over the ambient headers (per-call wins per key).
    pub headers: Option<HashMap<String, String>>,

    /// Structured body, serialized as JSON when present.
    pub body: Option<serde_json::Value>,

    /// Timeout in milliseconds; falls back to ambient, then 3000.
    pub timeout_ms: Option<u64>,
}

/// Ambient defaults shared by every lifecycle under one scope.
///
/// Same shape as [`RequestConfig`] minus the fields that only make sense
/// per call (url, endpoint, query, body).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AmbientConfig {
    /// Default headers, overridden key-by-key by per-call headers.
    pub headers: Option<HashMap<String, String>>,

    /// Default HTTP method.
    pub method: Option<String>,

    /// Default timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

/// Fully merged, ready-to-send request descriptor.
///
/// Derived fresh on every dispatch; comparing two resolutions of the same
/// inputs must yield equal values.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveRequest {
    /// Full URL: base + endpoint + optional `?query`.
    pub url: String,

    /// HTTP method name.
    pub method: String,

    /// Union of ambient and per-call headers.
    pub headers: HashMap<String, String>,

    /// JSON-serialized body, if the per-call config carried one.
    pub body: Option<String>,

    /// Timeout armed for the episode at dispatch.
    pub timeout: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_request_config() {
        let config: RequestConfig = toml::from_str("url = \"https://api.example.com\"").unwrap();
        assert_eq!(config.url, "https://api.example.com");
        assert!(config.method.is_none());
        assert!(config.headers.is_none());
        assert!(config.timeout_ms.is_none());
    }

    #[test]
    fn test_empty_ambient_config() {
        let config: AmbientConfig = toml::from_str("").unwrap();
        assert!(config.headers.is_none());
        assert!(config.method.is_none());
        assert!(config.timeout_ms.is_none());
    }
}
